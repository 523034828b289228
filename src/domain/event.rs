//! src/domain/event.rs

use crate::domain::{lenient, DocumentId, ValidationError};

/// A document of the `events` collection.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Event {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient::optional_document_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<DocumentId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_image: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_venue: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub event_tickets: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_held_by: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_link: String,
}

impl Event {
    pub fn status(&self) -> EventStatus {
        EventStatus::from(self.event_status.as_str())
    }

    pub fn id_str(&self) -> &str {
        self.id.as_ref().map(AsRef::as_ref).unwrap_or_default()
    }

    pub fn has_image(&self) -> bool {
        !self.event_image.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
    Rescheduled,
    Declined,
    Other(String),
}

impl EventStatus {
    pub const ALL: [EventStatus; 6] = [
        EventStatus::Upcoming,
        EventStatus::Ongoing,
        EventStatus::Completed,
        EventStatus::Cancelled,
        EventStatus::Rescheduled,
        EventStatus::Declined,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
            EventStatus::Rescheduled => "Rescheduled",
            EventStatus::Declined => "Declined",
            EventStatus::Other(s) => s,
        }
    }

    /// CSS class of the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "badge-blue",
            EventStatus::Ongoing => "badge-green",
            EventStatus::Completed => "badge-purple",
            EventStatus::Cancelled | EventStatus::Declined => "badge-red",
            EventStatus::Rescheduled => "badge-yellow",
            EventStatus::Other(_) => "badge-gray",
        }
    }
}

impl From<&str> for EventStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "upcoming" => EventStatus::Upcoming,
            "ongoing" => EventStatus::Ongoing,
            "completed" => EventStatus::Completed,
            "cancelled" => EventStatus::Cancelled,
            "rescheduled" => EventStatus::Rescheduled,
            "declined" => EventStatus::Declined,
            _ => EventStatus::Other(s.to_owned()),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form used to create and edit events.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct EventFormData {
    pub event_name: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub event_venue: String,
    #[serde(default)]
    pub event_image: String,
    #[serde(default)]
    pub event_description: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub event_held_by: String,
    #[serde(default)]
    pub event_tickets: String,
    #[serde(default)]
    pub event_status: String,
    #[serde(default)]
    pub event_link: String,
}

impl TryFrom<EventFormData> for Event {
    type Error = ValidationError;

    fn try_from(form: EventFormData) -> Result<Self, Self::Error> {
        let event_name = form.event_name.trim().to_owned();
        if event_name.is_empty() {
            return Err(ValidationError::MissingField("event_name"));
        }
        let tickets = form.event_tickets.trim();
        let event_tickets = if tickets.is_empty() {
            0
        } else {
            tickets
                .parse()
                .map_err(|_| ValidationError::InvalidNumber(tickets.to_owned()))?
        };
        let event_status = if form.event_status.trim().is_empty() {
            EventStatus::Upcoming.to_string()
        } else {
            form.event_status
        };
        Ok(Self {
            id: None,
            event_name,
            event_date: form.event_date,
            event_time: form.event_time,
            event_image: form.event_image,
            event_description: form.event_description,
            event_venue: form.event_venue,
            event_tickets,
            event_type: form.event_type,
            event_held_by: form.event_held_by,
            event_status,
            event_link: form.event_link,
        })
    }
}
