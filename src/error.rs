//! src/error.rs

use crate::authentication::CredentialsError;
use crate::backend_client::BackendError;
use crate::domain::ValidationError;
use crate::session_state::SessionError;
use crate::utils::see_other;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use actix_web_flash_messages::FlashMessage;

pub type DashResult<T> = Result<T, Error>;

/// Shown whenever the backend rejects the bearer token of the session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Invalid API or Session has expired, Please log back in";

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error(transparent)]
    BackendError(#[from] BackendError),
    #[error(transparent)]
    SessionError(#[from] SessionError),
    #[error(transparent)]
    AuthError(#[from] CredentialsError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse {
        if self.is_session_expired() {
            FlashMessage::error(SESSION_EXPIRED_MESSAGE).send();
            return see_other("/login");
        }
        match self {
            Error::ValidationError(_) => HttpResponse::new(StatusCode::BAD_REQUEST),
            Error::BackendError(_) => HttpResponse::new(StatusCode::BAD_GATEWAY),
            Error::AuthError(_) => HttpResponse::new(StatusCode::UNAUTHORIZED),
            Error::SessionError(_) | Error::UnexpectedError(_) => {
                HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl Error {
    /// The backend no longer accepts the bearer token stored in the session,
    /// or there never was one.
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            Error::BackendError(BackendError::Unauthorized)
                | Error::SessionError(SessionError::UserNotLoggedIn)
        )
    }

    /// Message that is safe to show to the signed-in user in a flash message.
    pub fn user_message(&self) -> String {
        match self {
            Error::ValidationError(e) => e.to_string(),
            Error::AuthError(e) => e.to_string(),
            Error::BackendError(BackendError::Status { message, .. }) => message.to_owned(),
            Error::BackendError(_) => "The backend could not be reached. Please try again.".into(),
            Error::SessionError(_) | Error::UnexpectedError(_) => {
                "Something went wrong. Please try again.".into()
            }
        }
    }
}
