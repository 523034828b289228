//! src/domain/user.rs

use crate::domain::{lenient, DocumentId, ValidationError};
use serde_json::{Map, Value};
use validator::ValidateEmail;

/// A document of the `users` collection. Fields the dashboard does not
/// edit are kept in `extra`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct User {
    #[serde(rename = "_id", deserialize_with = "lenient::document_id")]
    pub id: DocumentId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, serde::Deserialize)]
pub struct UserFormData {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserFormData {
    /// The fields to merge into the stored user document.
    pub fn into_update(self) -> Result<Value, ValidationError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        let email = self.email.trim().to_owned();
        if !email.is_empty() && !email.validate_email() {
            return Err(ValidationError::InvalidEmail(email));
        }
        Ok(serde_json::json!({
            "name": name,
            "email": email,
            "role": self.role.trim(),
        }))
    }
}
