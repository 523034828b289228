//! src/routes/mic/analysis.rs

use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::{
    participation, Bar, Event, EventParticipation, ParticipationAnalysis, TimePeriod,
};
use crate::error::DashResult;
use crate::routes::admin::events::{with_registrations, EVENTS_TABLE};
use crate::routes::{period_options, PeriodQuery, SelectOption};
use crate::utils::{flash_contents, today};
use actix_web::{web, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "mic_analysis.html")]
struct ParticipationTemplate {
    flash_messages: Vec<String>,
    period: TimePeriod,
    period_options: Vec<SelectOption>,
    analysis: ParticipationAnalysis,
    bars: Vec<Bar>,
}

/// Registrations per event within the selected period.
#[tracing::instrument(name = "Show event participation", skip(client, token, flash_messages))]
pub async fn mic_analysis(
    query: web::Query<PeriodQuery>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    let period = query.period_or(TimePeriod::All);
    let events: Vec<Event> = client.fetch_records(EVENTS_TABLE, &token).await?;
    let counted = with_registrations(events, &client, &token)
        .await?
        .into_iter()
        .map(|(event, participants)| EventParticipation {
            name: event.event_name,
            participants,
            date: event.event_date,
        })
        .collect();
    let analysis = participation(counted, period, today());
    Ok(ParticipationTemplate {
        flash_messages: flash_contents(flash_messages),
        period,
        period_options: period_options(period),
        bars: analysis.bars(),
        analysis,
    })
}
