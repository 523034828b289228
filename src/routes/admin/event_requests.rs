//! src/routes/admin/event_requests.rs

use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::{
    distinct_values, DocumentId, Event, EventRequest, EventRequestFilter, EventStatus,
    NotificationEmail, ValidationError,
};
use crate::error::{DashResult, Error};
use crate::routes::admin::events::EVENTS_TABLE;
use crate::routes::SelectOption;
use crate::utils::{flash_contents, redirect_with_error, see_other};
use actix_web::{error::InternalError, web, HttpResponse, Responder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use askama_actix::Template;

const REQUESTS_TABLE: &str = "event_requests";
const REQUESTS_PAGE: &str = "/admin/event_requests";

#[derive(Template)]
#[template(path = "event_requests.html")]
struct EventRequestsTemplate {
    flash_messages: Vec<String>,
    requests: Vec<EventRequest>,
    total: usize,
    filter: EventRequestFilter,
    type_options: Vec<SelectOption>,
    society_options: Vec<SelectOption>,
}

#[tracing::instrument(name = "List event requests", skip_all)]
pub async fn event_requests_page(
    filter: web::Query<EventRequestFilter>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    let requests: Vec<EventRequest> = client.fetch_records(REQUESTS_TABLE, &token).await?;
    let filter = filter.0;
    let type_values = distinct_values(&requests, |r| r.event_type.as_str());
    let society_values = distinct_values(&requests, |r| r.society_name.as_str());
    Ok(EventRequestsTemplate {
        flash_messages: flash_contents(flash_messages),
        total: requests.len(),
        requests: filter.apply(&requests).into_iter().cloned().collect(),
        type_options: SelectOption::with_all(&type_values, &filter.event_type),
        society_options: SelectOption::with_all(&society_values, &filter.society),
        filter,
    })
}

/// Send a notification, reporting failures to the user without failing
/// the request that triggered it.
async fn notify(
    email: Option<NotificationEmail>,
    client: &BackendClient,
    token: &BearerToken,
) -> Result<(), Error> {
    let Some(email) = email else {
        return Ok(());
    };
    match client.send_email(&email, token).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let e = Error::from(e);
            if e.is_session_expired() {
                return Err(e);
            }
            tracing::warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to send notification email"
            );
            FlashMessage::warning("The notification email could not be sent.").send();
            Ok(())
        }
    }
}

/// Publish the request as an upcoming event and tell its creator.
#[tracing::instrument(name = "Approve event request", skip_all, fields(request_id=%request_id))]
pub async fn approve_event_request(
    request_id: web::Path<DocumentId>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, REQUESTS_PAGE);
    let request: EventRequest = client
        .fetch_record(REQUESTS_TABLE, &request_id, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    let event = Event::from_request(&request, EventStatus::Upcoming);
    client
        .store(EVENTS_TABLE, &event, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    client
        .approve_event_request(&request_id, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    notify(NotificationEmail::request_approved(&request), &client, &token)
        .await
        .map_err(redirect)?;
    FlashMessage::info(format!("Event request \"{}\" approved.", request.event_name)).send();
    Ok(see_other(REQUESTS_PAGE))
}

#[derive(serde::Deserialize)]
pub struct RejectFormData {
    #[serde(default)]
    reason: String,
}

/// Record the request as a declined event, tell its creator why and remove
/// the request.
#[tracing::instrument(name = "Reject event request", skip_all, fields(request_id=%request_id))]
pub async fn reject_event_request(
    request_id: web::Path<DocumentId>,
    form: web::Form<RejectFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, REQUESTS_PAGE);
    let reason = form.0.reason.trim().to_owned();
    if reason.is_empty() {
        return Err(redirect(ValidationError::MissingField("reason").into()));
    }
    let request: EventRequest = client
        .fetch_record(REQUESTS_TABLE, &request_id, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    let event = Event::from_request(&request, EventStatus::Declined);
    client
        .store(EVENTS_TABLE, &event, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    notify(
        NotificationEmail::request_rejected(&request, &reason),
        &client,
        &token,
    )
    .await
    .map_err(redirect)?;
    client
        .delete(REQUESTS_TABLE, &request_id, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info(format!("Event request \"{}\" declined.", request.event_name)).send();
    Ok(see_other(REQUESTS_PAGE))
}

#[derive(serde::Deserialize)]
pub struct TimeFormData {
    #[serde(default)]
    time: String,
}

#[tracing::instrument(name = "Add time to event request", skip_all, fields(request_id=%request_id))]
pub async fn add_event_request_time(
    request_id: web::Path<DocumentId>,
    form: web::Form<TimeFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, REQUESTS_PAGE);
    let time = form.0.time.trim().to_owned();
    if time.is_empty() {
        return Err(redirect(ValidationError::MissingField("time").into()));
    }
    client
        .add_event_request_time(&request_id, &time, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info("Time added to the event request.").send();
    Ok(see_other(REQUESTS_PAGE))
}
