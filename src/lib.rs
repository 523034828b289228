//! src/lib.rs
pub mod authentication;
pub mod backend_client;
pub mod configuration;
pub mod domain;
pub mod error;
pub mod export;
pub mod routes;
pub mod session_state;
pub mod startup;
pub mod telemetry;
pub mod utils;
