//! src/routes/admin/users.rs

use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::{merge_fields, DocumentId, User, UserFormData};
use crate::error::{DashResult, Error};
use crate::utils::{flash_contents, redirect_with_error, see_other};
use actix_web::{error::InternalError, web, HttpResponse, Responder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use askama_actix::Template;

const USERS_TABLE: &str = "users";

#[derive(Template)]
#[template(path = "users.html")]
struct UsersTemplate {
    flash_messages: Vec<String>,
    users: Vec<User>,
}

#[tracing::instrument(name = "List users", skip_all)]
pub async fn users_page(
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    let users = client.fetch_records(USERS_TABLE, &token).await?;
    Ok(UsersTemplate {
        flash_messages: flash_contents(flash_messages),
        users,
    })
}

/// Merge the edited name, email and role into the stored user document.
#[tracing::instrument(name = "Update user", skip_all, fields(user_id=%user_id))]
pub async fn update_user(
    user_id: web::Path<DocumentId>,
    form: web::Form<UserFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, "/admin/users");
    let update = form.0.into_update().map_err(|e| redirect(e.into()))?;
    let original = client
        .fetch_document(USERS_TABLE, &user_id, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    client
        .update(USERS_TABLE, &user_id, merge_fields(original, update), &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info("User updated.").send();
    Ok(see_other("/admin/users"))
}
