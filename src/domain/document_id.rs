//! src/domain/document_id.rs

use crate::domain::ValidationError;
use serde_json::Value;

/// Identifier of a backend document (`_id`).
///
/// The backend serialises ids either as plain strings or in extended JSON
/// as `{"$oid": "..."}`; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn parse(s: String) -> Result<Self, ValidationError> {
        let is_empty = s.trim().is_empty();
        let is_too_long = s.chars().count() > 128;
        let has_forbidden_chars = s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '/');
        if is_empty || is_too_long || has_forbidden_chars {
            Err(ValidationError::InvalidDocumentId(s))
        } else {
            Ok(Self(s))
        }
    }

    /// Extract the id of a raw document.
    pub fn of(document: &Value) -> Option<Self> {
        Self::from_value(document.get("_id")?)
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let raw = match value {
            Value::String(s) => s.to_owned(),
            Value::Object(fields) => fields.get("$oid")?.as_str()?.to_owned(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Self::parse(raw).ok()
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Ids in URLs and form fields are plain strings.
impl<'de> serde::Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(IdVisitor)
    }
}

struct IdVisitor;

impl<'de> serde::de::Visitor<'de> for IdVisitor {
    type Value = DocumentId;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a document id")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        DocumentId::parse(v.to_owned()).map_err(E::custom)
    }
}
