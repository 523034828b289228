//! src/domain/notification.rs

use crate::domain::EventRequest;
use validator::ValidateEmail;

const SIGNATURE: &str = "Campus Administration";

/// Body of the backend `email/send` endpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NotificationEmail {
    pub to: String,
    pub subject: String,
    pub message: String,
    pub html_content: String,
}

impl NotificationEmail {
    /// Tells the creator that their event request was approved. `None` if
    /// the request carries no usable creator address.
    pub fn request_approved(request: &EventRequest) -> Option<Self> {
        let to = creator_address(request)?;
        let name = &request.event_name;
        let date = request.display_date();
        let location = &request.location;
        let message = format!(
            "Dear organizer,\n\nYour event request \"{name}\" scheduled for {date} \
             has been approved. It is now listed as an upcoming event.\n\n\
             Location: {location}\n\n{SIGNATURE}"
        );
        let html_content = format!(
            "<p>Dear organizer,</p>\
             <p>Your event request <strong>{}</strong> scheduled for {} has been approved. \
             It is now listed as an upcoming event.</p>\
             <p><strong>Location:</strong> {}</p>\
             <p>{SIGNATURE}</p>",
            htmlescape::encode_minimal(name),
            htmlescape::encode_minimal(&date),
            htmlescape::encode_minimal(location),
        );
        Some(Self {
            to,
            subject: format!("Event request approved: {name}"),
            message,
            html_content,
        })
    }

    /// Tells the creator that their event request was declined and why.
    pub fn request_rejected(request: &EventRequest, reason: &str) -> Option<Self> {
        let to = creator_address(request)?;
        let name = &request.event_name;
        let date = request.display_date();
        let location = &request.location;
        let message = format!(
            "Dear organizer,\n\nYour event request \"{name}\" scheduled for {date} \
             has been declined.\n\nLocation: {location}\nReason: {reason}\n\n{SIGNATURE}"
        );
        let html_content = format!(
            "<p>Dear organizer,</p>\
             <p>Your event request <strong>{}</strong> scheduled for {} has been declined.</p>\
             <p><strong>Location:</strong> {}</p>\
             <p><strong>Reason:</strong> {}</p>\
             <p>{SIGNATURE}</p>",
            htmlescape::encode_minimal(name),
            htmlescape::encode_minimal(&date),
            htmlescape::encode_minimal(location),
            htmlescape::encode_minimal(reason),
        );
        Some(Self {
            to,
            subject: format!("Event request declined: {name}"),
            message,
            html_content,
        })
    }
}

fn creator_address(request: &EventRequest) -> Option<String> {
    let email = request.creator_email.trim();
    if email.is_empty() {
        return None;
    }
    if !email.validate_email() {
        tracing::warn!(creator_email = %email, "Skipping notification to invalid address");
        return None;
    }
    Some(email.to_owned())
}
