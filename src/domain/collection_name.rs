//! src/domain/collection_name.rs

use crate::domain::ValidationError;
use unicode_segmentation::UnicodeSegmentation;

/// Collections offered by the document browser before any are created.
pub const DEFAULT_COLLECTIONS: [&str; 21] = [
    "admin",
    "mic_users",
    "users",
    "students",
    "lecturers",
    "staff",
    "vendors",
    "events",
    "event_requests",
    "event_registrations",
    "timetable",
    "food_orders",
    "food_order_items",
    "queue_management",
    "campus_facilities",
    "payments",
    "todays_pick",
    "news",
    "crowd_uplink",
    "restaurants",
    "dishes",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionName(String);

impl CollectionName {
    /// Returns an instance of `CollectionName` if the input satisfies all
    /// our validation constraints on collection names.
    pub fn parse(s: String) -> Result<CollectionName, ValidationError> {
        let s = s.trim().to_owned();
        if s.is_empty() {
            return Err(ValidationError::CollectionNameRequired);
        }
        // A grapheme is defined by the Unicode standard as a "user-perceived"
        // character: `å` is a single grapheme, but it is composed of two characters
        // (`a` and `̊`).
        let is_too_long = s.graphemes(true).count() > 64;
        let has_forbidden_characters = s
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        if is_too_long || has_forbidden_characters {
            Err(ValidationError::InvalidCollectionName(s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
