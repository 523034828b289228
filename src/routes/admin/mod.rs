//! src/routes/admin/mod.rs

mod dashboard;
mod documents;
mod event_requests;
pub(crate) mod events;
mod lectures;
mod logout;
mod news;
mod users;

pub(crate) use dashboard::DashboardTemplate;
pub use dashboard::admin_dashboard;
pub use documents::*;
pub use event_requests::*;
pub use events::{create_event, delete_event, events_page, export_events, update_event};
pub use lectures::*;
pub use logout::log_out;
pub use news::*;
pub use users::*;
