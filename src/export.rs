//! src/export.rs
//!
//! CSV downloads of event lists and document browser pages.

use crate::domain::{document_table, Event};
use anyhow::Context;
use serde_json::Value;

const EVENT_HEADERS: [&str; 11] = [
    "event_name",
    "event_date",
    "event_time",
    "event_venue",
    "event_type",
    "event_held_by",
    "event_tickets",
    "event_status",
    "event_link",
    "event_description",
    "registrations",
];

/// Events with their registration counts. Images are left out.
pub fn events_csv(events: &[(Event, u64)]) -> Result<Vec<u8>, anyhow::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EVENT_HEADERS)?;
    for (event, registrations) in events {
        let tickets = event.event_tickets.to_string();
        let registrations = registrations.to_string();
        writer.write_record([
            event.event_name.as_str(),
            event.event_date.as_str(),
            event.event_time.as_str(),
            event.event_venue.as_str(),
            event.event_type.as_str(),
            event.event_held_by.as_str(),
            tickets.as_str(),
            event.event_status.as_str(),
            event.event_link.as_str(),
            event.event_description.as_str(),
            registrations.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush the event CSV writer.")
}

/// One column per top level key; nested values are written as JSON.
pub fn documents_csv(documents: &[Value]) -> Result<Vec<u8>, anyhow::Error> {
    let (headers, rows) = document_table(documents);
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush the document CSV writer.")
}

/// `Content-Disposition` value for a download called `name`.csv.
pub fn attachment(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    format!("attachment; filename=\"{}.csv\"", safe)
}
