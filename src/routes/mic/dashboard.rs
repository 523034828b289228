//! src/routes/mic/dashboard.rs

use crate::authentication::AdminEmail;
use crate::backend_client::{BackendClient, BearerToken};
use crate::error::DashResult;
use crate::routes::admin::DashboardTemplate;
use crate::routes::NavCard;
use actix_web::{web, Responder};
use actix_web_flash_messages::IncomingFlashMessages;

static MIC_CARDS: [NavCard; 2] = [
    NavCard {
        title: "Event Management",
        description: "Request new events and maintain your society's events.",
        href: "/mic/events",
    },
    NavCard {
        title: "Event Analysis",
        description: "Compare registrations across events.",
        href: "/mic/analysis",
    },
];

#[tracing::instrument(name = "Show MIC dashboard", skip_all, fields(email=%&*email))]
pub async fn mic_dashboard(
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    email: web::ReqData<AdminEmail>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    DashboardTemplate::load(
        "MIC Dashboard",
        &MIC_CARDS,
        &client,
        &token,
        &email,
        flash_messages,
    )
    .await
}
