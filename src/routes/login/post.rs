//! src/routes/login/post.rs

use crate::authentication::{validate_credentials, Credentials};
use crate::backend_client::BackendClient;
use crate::error::Error;
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::{error::InternalError, web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::Secret;

#[derive(serde::Deserialize)]
pub struct FormData {
    #[serde(default)]
    email: String,
    #[serde(default = "empty_password")]
    password: Secret<String>,
}

fn empty_password() -> Secret<String> {
    Secret::new(String::new())
}

#[tracing::instrument(
    skip(form, client, session),
    fields(email=tracing::field::Empty)
)]
pub async fn login(
    form: web::Form<FormData>,
    client: web::Data<BackendClient>,
    session: TypedSession,
) -> Result<HttpResponse, InternalError<Error>> {
    let credentials = Credentials {
        email: form.0.email,
        password: form.0.password,
    };
    tracing::Span::current().record("email", &tracing::field::display(&credentials.email));
    match validate_credentials(credentials, &client).await {
        Ok((email, token)) => {
            session.renew();
            session
                .insert_bearer_token(&token)
                .and_then(|_| session.insert_email(&email))
                .map_err(login_redirect)?;
            Ok(see_other("/admin/dashboard"))
        }
        Err(e) => Err(login_redirect(Error::from(e))),
    }
}

fn login_redirect(e: Error) -> InternalError<Error> {
    FlashMessage::error(e.user_message()).send();
    let response = see_other("/login");
    InternalError::from_response(e, response)
}
