//! src/routes/admin/lectures.rs

use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::Lecture;
use crate::error::{DashResult, Error};
use crate::utils::{flash_contents, redirect_with_error, see_other};
use actix_web::{error::InternalError, web, HttpResponse, Responder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use askama_actix::Template;

const LECTURES_TABLE: &str = "lectures";

#[derive(Template)]
#[template(path = "lectures.html")]
struct LecturesTemplate {
    flash_messages: Vec<String>,
    lectures: Vec<Lecture>,
}

#[tracing::instrument(name = "List lectures", skip_all)]
pub async fn lectures_page(
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    let lectures = client.fetch_records(LECTURES_TABLE, &token).await?;
    Ok(LecturesTemplate {
        flash_messages: flash_contents(flash_messages),
        lectures,
    })
}

#[tracing::instrument(name = "Schedule lecture", skip_all, fields(course=%form.course))]
pub async fn schedule_lecture(
    form: web::Form<Lecture>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, "/admin/lectures");
    let lecture = form.0.validate().map_err(|e| redirect(e.into()))?;
    client
        .store(LECTURES_TABLE, &lecture, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info("Lecture added.").send();
    Ok(see_other("/admin/lectures"))
}
