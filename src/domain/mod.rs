//! src/domain/mod.rs

mod analytics;
mod collection_name;
mod document;
mod document_id;
mod event;
mod event_request;
mod filters;
pub(crate) mod lenient;
mod lecture;
mod menu;
mod news;
mod notification;
mod order;
mod system_stat;
mod user;

pub use analytics::*;
pub use collection_name::{CollectionName, DEFAULT_COLLECTIONS};
pub use document::*;
pub use document_id::DocumentId;
pub use event::{Event, EventFormData, EventStatus};
pub use event_request::{
    calendar_date, EventRequest, EventRequestFormData, NewEventRequest, RequestAttachment,
    STALL_EVENT_TYPE,
};
pub use filters::{distinct_values, EventFilter, EventRequestFilter};
pub use lecture::Lecture;
pub use menu::{MenuItem, MenuItemFormData, NewMenuItem};
pub use news::NewsItem;
pub use notification::NotificationEmail;
pub use order::{Complaint, FoodOrder, OrderAction, OrderStatus, PaymentStatus};
pub use system_stat::{monitor_points, MonitorPoint, SystemStat, MONITOR_POINTS};
pub use user::{User, UserFormData};

/// Validation error for form input and documents
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Please enter both email and password.")]
    MissingCredentials,
    #[error("`{0}` is not a valid email.")]
    InvalidEmail(String),
    #[error("`{0}` is required.")]
    MissingField(&'static str),
    #[error("Collection name is required")]
    CollectionNameRequired,
    #[error("`{0}` is not a valid collection name.")]
    InvalidCollectionName(String),
    #[error("`{0}` is not a valid document id.")]
    InvalidDocumentId(String),
    #[error("Invalid JSON format")]
    InvalidJson,
    #[error("Password is required")]
    PasswordRequired,
    #[error("`{0}` is not a valid number.")]
    InvalidNumber(String),
    #[error("`{0}` is not a valid time.")]
    InvalidTime(String),
    #[error("An order that is {from} cannot be {action}.")]
    InvalidOrderTransition { from: String, action: &'static str },
}
