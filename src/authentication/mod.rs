//! src/authentication/mod.rs

mod credentials;
mod middleware;

pub use credentials::{validate_credentials, Credentials, CredentialsError};
pub use middleware::{reject_anonymous_users, AdminEmail};
