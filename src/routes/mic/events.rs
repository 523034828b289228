//! src/routes/mic/events.rs
//!
//! MIC view of the event list. New events go through an event request
//! that an administrator has to approve.

use crate::authentication::AdminEmail;
use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::{DocumentId, EventFilter, EventFormData, EventRequestFormData, NewEventRequest};
use crate::error::{DashResult, Error};
use crate::routes::admin::events::{
    apply_event_delete, apply_event_update, render_events, EventsArea,
};
use crate::utils::{redirect_with_error, see_other};
use actix_web::{error::InternalError, web, HttpResponse, Responder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};

static MIC_EVENTS: EventsArea = EventsArea {
    title: "MIC Event Management",
    base_path: "/mic/events",
    create_action: "/mic/event_requests",
    create_label: "Submit event request",
    is_admin: false,
};

#[tracing::instrument(name = "List MIC events", skip_all)]
pub async fn mic_events_page(
    filter: web::Query<EventFilter>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    render_events(&MIC_EVENTS, filter.0, &client, &token, flash_messages).await
}

#[tracing::instrument(
    name = "Submit event request",
    skip_all,
    fields(event_name=%form.event_name, creator=%&*email)
)]
pub async fn submit_event_request(
    form: web::Form<EventRequestFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    email: web::ReqData<AdminEmail>,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, MIC_EVENTS.base_path);
    let request =
        NewEventRequest::parse(form.0, email.to_string()).map_err(|e| redirect(e.into()))?;
    client
        .store("event_requests", &request, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info(format!(
        "Event request \"{}\" submitted for approval.",
        request.event_name
    ))
    .send();
    Ok(see_other(MIC_EVENTS.base_path))
}

#[tracing::instrument(name = "Update MIC event", skip_all, fields(event_id=%event_id))]
pub async fn mic_update_event(
    event_id: web::Path<DocumentId>,
    form: web::Form<EventFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    apply_event_update(MIC_EVENTS.base_path, &event_id, form.0, &client, &token).await
}

#[tracing::instrument(name = "Delete MIC event", skip_all, fields(event_id=%event_id))]
pub async fn mic_delete_event(
    event_id: web::Path<DocumentId>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    apply_event_delete(MIC_EVENTS.base_path, &event_id, &client, &token).await
}
