//! src/domain/lecture.rs

use crate::domain::{lenient, ValidationError};

/// A scheduled lecture of the `lectures` collection. Doubles as the form of
/// the lecture scheduling screen.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lecture {
    #[serde(default, deserialize_with = "lenient::string")]
    pub course: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub lecturer: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub room: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub day: String,
}

impl Lecture {
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.course.trim().is_empty() {
            return Err(ValidationError::MissingField("course"));
        }
        Ok(self)
    }
}
