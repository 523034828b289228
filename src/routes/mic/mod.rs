//! src/routes/mic/mod.rs
//!
//! Screens of society and club administrators (MIC).

mod analysis;
mod dashboard;
mod events;

pub use analysis::*;
pub use dashboard::*;
pub use events::*;
