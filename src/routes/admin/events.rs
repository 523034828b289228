//! src/routes/admin/events.rs
//!
//! Event list with filters and registration counts. The same page serves
//! the admin and the MIC area; only the admin may create events directly.

use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::{
    distinct_values, merge_fields, DocumentId, Event, EventFilter, EventFormData, EventStatus,
};
use crate::error::{DashResult, Error};
use crate::export::{attachment, events_csv};
use crate::routes::SelectOption;
use crate::telemetry::spawn_blocking_with_tracing;
use crate::utils::{flash_contents, redirect_with_error, see_other, tolerate};
use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{error::InternalError, web, HttpResponse, Responder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use anyhow::Context;
use askama_actix::Template;

pub(crate) const EVENTS_TABLE: &str = "events";
const REGISTRATIONS_TABLE: &str = "event_registrations";

pub(crate) struct EventsArea {
    pub title: &'static str,
    pub base_path: &'static str,
    pub create_action: &'static str,
    pub create_label: &'static str,
    pub is_admin: bool,
}

static ADMIN_EVENTS: EventsArea = EventsArea {
    title: "Event Management",
    base_path: "/admin/events",
    create_action: "/admin/events",
    create_label: "Create event",
    is_admin: true,
};

pub(crate) struct EventRow {
    pub event: Event,
    pub registrations: u64,
    pub status: EventStatus,
    pub status_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "events.html")]
pub(crate) struct EventsTemplate {
    area: &'static EventsArea,
    flash_messages: Vec<String>,
    rows: Vec<EventRow>,
    total: usize,
    filter: EventFilter,
    type_options: Vec<SelectOption>,
    society_options: Vec<SelectOption>,
    status_options: Vec<SelectOption>,
    export_query: String,
}

fn status_names() -> Vec<String> {
    EventStatus::ALL.iter().map(|s| s.to_string()).collect()
}

/// Registrations of each event, counted by the backend. A failing count
/// shows as zero.
pub(crate) async fn with_registrations(
    events: Vec<Event>,
    client: &BackendClient,
    token: &BearerToken,
) -> DashResult<Vec<(Event, u64)>> {
    let mut rows = Vec::with_capacity(events.len());
    for event in events {
        let registrations = match &event.id {
            Some(id) => tolerate(
                client
                    .count_where(REGISTRATIONS_TABLE, "event_id", id.as_ref(), token)
                    .await,
                "registration count",
            )?,
            None => 0,
        };
        rows.push((event, registrations));
    }
    Ok(rows)
}

pub(crate) async fn render_events(
    area: &'static EventsArea,
    filter: EventFilter,
    client: &BackendClient,
    token: &BearerToken,
    flash_messages: IncomingFlashMessages,
) -> DashResult<EventsTemplate> {
    let events: Vec<Event> = client.fetch_records(EVENTS_TABLE, token).await?;
    let type_values = distinct_values(&events, |e| e.event_type.as_str());
    let society_values = distinct_values(&events, |e| e.event_held_by.as_str());
    let total = events.len();
    let matching: Vec<Event> = filter.apply(&events).into_iter().cloned().collect();
    let statuses = status_names();
    let rows = with_registrations(matching, client, token)
        .await?
        .into_iter()
        .map(|(event, registrations)| EventRow {
            status: event.status(),
            status_options: SelectOption::from_values(&statuses, &event.event_status),
            event,
            registrations,
        })
        .collect();
    Ok(EventsTemplate {
        area,
        flash_messages: flash_contents(flash_messages),
        rows,
        total,
        type_options: SelectOption::with_all(&type_values, &filter.event_type),
        society_options: SelectOption::with_all(&society_values, &filter.society),
        status_options: SelectOption::with_all(&statuses, &filter.status),
        export_query: filter.query_string(),
        filter,
    })
}

#[tracing::instrument(name = "List events", skip_all)]
pub async fn events_page(
    filter: web::Query<EventFilter>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    render_events(&ADMIN_EVENTS, filter.0, &client, &token, flash_messages).await
}

#[tracing::instrument(name = "Create event", skip_all, fields(event_name=%form.event_name))]
pub async fn create_event(
    form: web::Form<EventFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, ADMIN_EVENTS.base_path);
    let event = Event::try_from(form.0).map_err(|e| redirect(e.into()))?;
    client
        .store(EVENTS_TABLE, &event, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info(format!("Event \"{}\" created.", event.event_name)).send();
    Ok(see_other(ADMIN_EVENTS.base_path))
}

/// Overwrite the editable fields of a stored event. An empty image field
/// keeps the stored image.
pub(crate) async fn apply_event_update(
    base_path: &str,
    event_id: &DocumentId,
    form: EventFormData,
    client: &BackendClient,
    token: &BearerToken,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, base_path);
    let event = Event::try_from(form).map_err(|e| redirect(e.into()))?;
    let mut update = serde_json::to_value(&event)
        .context("Failed to serialize the event.")
        .map_err(|e| redirect(e.into()))?;
    if event.event_image.is_empty() {
        if let Some(fields) = update.as_object_mut() {
            fields.remove("event_image");
        }
    }
    let original = client
        .fetch_document(EVENTS_TABLE, event_id, token)
        .await
        .map_err(|e| redirect(e.into()))?;
    client
        .update(EVENTS_TABLE, event_id, merge_fields(original, update), token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info(format!("Event \"{}\" updated.", event.event_name)).send();
    Ok(see_other(base_path))
}

pub(crate) async fn apply_event_delete(
    base_path: &str,
    event_id: &DocumentId,
    client: &BackendClient,
    token: &BearerToken,
) -> Result<HttpResponse, InternalError<Error>> {
    client
        .delete(EVENTS_TABLE, event_id, token)
        .await
        .map_err(|e| redirect_with_error(e.into(), base_path))?;
    FlashMessage::info("Event deleted.").send();
    Ok(see_other(base_path))
}

#[tracing::instrument(name = "Update event", skip_all, fields(event_id=%event_id))]
pub async fn update_event(
    event_id: web::Path<DocumentId>,
    form: web::Form<EventFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    apply_event_update(ADMIN_EVENTS.base_path, &event_id, form.0, &client, &token).await
}

#[tracing::instrument(name = "Delete event", skip_all, fields(event_id=%event_id))]
pub async fn delete_event(
    event_id: web::Path<DocumentId>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    apply_event_delete(ADMIN_EVENTS.base_path, &event_id, &client, &token).await
}

/// CSV of the events matching the filter, with registration counts.
#[tracing::instrument(name = "Export events", skip_all)]
pub async fn export_events(
    filter: web::Query<EventFilter>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> DashResult<HttpResponse> {
    let events: Vec<Event> = client.fetch_records(EVENTS_TABLE, &token).await?;
    let matching: Vec<Event> = filter.apply(&events).into_iter().cloned().collect();
    let rows = with_registrations(matching, &client, &token).await?;
    let csv = spawn_blocking_with_tracing(move || events_csv(&rows))
        .await
        .context("Failed to spawn blocking task.")??;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((CONTENT_DISPOSITION, attachment("events")))
        .body(csv))
}
