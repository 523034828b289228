//! tests/api/main.rs

mod dashboard;
mod documents;
mod helpers;
mod users;
mod vendor;
