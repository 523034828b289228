//! src/authentication/middleware.rs

use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    FromRequest, HttpMessage,
};
use actix_web_lab::middleware::Next;
use std::ops::Deref;

/// Guard for every signed-in area. Requests without a bearer token in
/// their session are sent to the login form; otherwise the token and the
/// signed-in email are handed to the handlers as request data.
pub async fn reject_anonymous_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;

    match session.get_bearer_token()? {
        Some(token) => {
            let email = session.get_email()?.unwrap_or_default();
            req.extensions_mut().insert(token);
            req.extensions_mut().insert(AdminEmail(email));
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        None => {
            tracing::info!(path = %req.path(), "Anonymous request sent to login");
            let response = see_other("/login");
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}

/// Email address the current session signed in with.
#[derive(Debug, Clone)]
pub struct AdminEmail(String);

impl std::fmt::Display for AdminEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for AdminEmail {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
