//! src/domain/event_request.rs

use crate::domain::{lenient, DocumentId, Event, EventStatus, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};

/// Stalls are not held by a society.
pub const STALL_EVENT_TYPE: &str = "A Stall";

/// Binary attachment embedded in an event request (`image`, `file`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RequestAttachment {
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub mime_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub data: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

impl RequestAttachment {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// A pending event-creation submission of the `event_requests` collection.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(rename = "_id", deserialize_with = "lenient::document_id")]
    pub id: DocumentId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub selected_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub selected_time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub max_tickets: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub society_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub registration_link: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub creator_email: String,
    #[serde(default)]
    pub image: Option<RequestAttachment>,
    #[serde(default)]
    pub file: Option<RequestAttachment>,
    /// Time added by an administrator after submission.
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: String,
}

impl EventRequest {
    pub fn date(&self) -> Option<NaiveDate> {
        calendar_date(&self.selected_date)
    }

    /// Date as shown to people, falling back to the raw value.
    pub fn display_date(&self) -> String {
        self.date()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| self.selected_date.clone())
    }

    pub fn image_url(&self) -> Option<String> {
        self.image.as_ref().map(RequestAttachment::data_url)
    }

    pub fn is_declined(&self) -> bool {
        EventStatus::from(self.status.as_str()) == EventStatus::Declined
    }
}

impl Event {
    /// The event that an approved or declined request turns into.
    pub fn from_request(request: &EventRequest, status: EventStatus) -> Self {
        Self {
            id: None,
            event_name: request.event_name.clone(),
            event_date: request.selected_date.clone(),
            event_time: request.selected_time.clone(),
            event_image: request.image_url().unwrap_or_default(),
            event_description: request.description.clone(),
            event_venue: request.location.clone(),
            event_tickets: request.max_tickets,
            event_type: request.event_type.clone(),
            event_held_by: request.society_name.clone(),
            event_status: status.to_string(),
            event_link: request.registration_link.clone(),
        }
    }
}

/// Parse the calendar day of a date or timestamp, as stored by the backend.
pub fn calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Event request form of the MIC event management screen.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct EventRequestFormData {
    pub event_name: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub event_venue: String,
    #[serde(default)]
    pub event_description: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub event_held_by: String,
    #[serde(default)]
    pub event_tickets: String,
}

/// Body sent to `event_requests/store`.
#[derive(Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventRequest {
    pub event_name: String,
    pub description: String,
    pub selected_date: String,
    pub selected_time: String,
    pub location: String,
    pub max_tickets: u32,
    pub event_type: String,
    pub society_name: String,
    pub creator_email: String,
}

impl NewEventRequest {
    pub fn parse(
        form: EventRequestFormData,
        creator_email: String,
    ) -> Result<Self, ValidationError> {
        let event_name = form.event_name.trim().to_owned();
        if event_name.is_empty() {
            return Err(ValidationError::MissingField("event_name"));
        }
        if form.event_date.trim().is_empty() {
            return Err(ValidationError::MissingField("event_date"));
        }
        let tickets = form.event_tickets.trim();
        let max_tickets = if tickets.is_empty() {
            0
        } else {
            tickets
                .parse()
                .map_err(|_| ValidationError::InvalidNumber(tickets.to_owned()))?
        };
        let society_name = if form.event_type == STALL_EVENT_TYPE {
            String::new()
        } else {
            form.event_held_by
        };
        Ok(Self {
            event_name,
            description: form.event_description,
            selected_date: form.event_date.trim().to_owned(),
            selected_time: normalize_time(&form.event_time)?,
            location: form.event_venue,
            max_tickets,
            event_type: form.event_type,
            society_name,
            creator_email,
        })
    }
}

/// `HH:MM` becomes `HH:MM:SS`; anything else must already be a valid time.
fn normalize_time(time: &str) -> Result<String, ValidationError> {
    let time = time.trim();
    if time.is_empty() {
        return Ok(String::new());
    }
    let with_seconds = match time.split(':').count() {
        2 => format!("{}:00", time),
        _ => time.to_owned(),
    };
    chrono::NaiveTime::parse_from_str(&with_seconds, "%H:%M:%S")
        .map(|_| with_seconds)
        .map_err(|_| ValidationError::InvalidTime(time.to_owned()))
}
