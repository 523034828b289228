//! src/authentication/credentials.rs

use crate::backend_client::{BackendClient, BackendError, BearerToken};
use crate::domain::ValidationError;
use crate::error::error_chain_fmt;
use secrecy::{ExposeSecret, Secret};
use validator::ValidateEmail;

type CredsResult<T> = Result<T, CredentialsError>;

#[derive(thiserror::Error)]
pub enum CredentialsError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
    #[error("{0}")]
    Rejected(String),
    #[error("Access token not received.")]
    NoAccessToken,
    #[error("The backend could not be reached. Please try again.")]
    Unreachable(#[source] BackendError),
}

impl std::fmt::Debug for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<BackendError> for CredentialsError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Status { message, .. } => CredentialsError::Rejected(message),
            BackendError::Unauthorized => CredentialsError::Rejected("Invalid credentials.".into()),
            other => CredentialsError::Unreachable(other),
        }
    }
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: Secret<String>,
}

impl Credentials {
    /// Both fields must be filled in and the email must be well-formed.
    pub fn check(self) -> Result<Self, ValidationError> {
        let email = self.email.trim().to_owned();
        if email.is_empty() || self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        if !email.validate_email() {
            return Err(ValidationError::InvalidEmail(email));
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

/// Exchange admin credentials for a bearer token at the backend.
#[tracing::instrument(name = "Validate credentials", skip(credentials, client))]
pub async fn validate_credentials(
    credentials: Credentials,
    client: &BackendClient,
) -> CredsResult<(String, BearerToken)> {
    let credentials = credentials.check()?;
    let token = client
        .authenticate_admin(&credentials.email, &credentials.password)
        .await?
        .ok_or(CredentialsError::NoAccessToken)?;
    Ok((credentials.email, token))
}
