//! src/utils.rs

use crate::backend_client::{BackendError, BackendResult};
use crate::error::{DashResult, Error, SESSION_EXPIRED_MESSAGE};
use actix_web::error::InternalError;
use actix_web::{http::header::LOCATION, HttpResponse};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::NaiveDate;

/// forward to other location
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// collect content of incoming flash messages for rendering
pub fn flash_contents(flash_messages: IncomingFlashMessages) -> Vec<String> {
    flash_messages
        .iter()
        .map(|m| m.content().to_string())
        .collect()
}

/// Log the error, tell the user about it and send them back to `location`.
/// An expired session always sends them to the login form instead.
pub fn redirect_with_error(e: Error, location: &str) -> InternalError<Error> {
    tracing::error!(
        error.cause_chain = ?e,
        error.message = %e,
        "Request to the backend failed"
    );
    let response = if e.is_session_expired() {
        FlashMessage::error(SESSION_EXPIRED_MESSAGE).send();
        see_other("/login")
    } else {
        FlashMessage::error(e.user_message()).send();
        see_other(location)
    };
    InternalError::from_response(e, response)
}

/// Secondary data of a page is optional: failures are logged and replaced
/// by the default value. A rejected session token still fails the request.
pub fn tolerate<T: Default>(result: BackendResult<T>, what: &str) -> DashResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(BackendError::Unauthorized) => Err(BackendError::Unauthorized.into()),
        Err(e) => {
            tracing::warn!(error.cause_chain = ?e, error.message = %e, "Failed to load {}", what);
            Ok(T::default())
        }
    }
}

/// The calendar day analytics periods are relative to.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
