//! src/routes/admin/dashboard.rs

use crate::authentication::AdminEmail;
use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::{display_value, monitor_points, MonitorPoint, SystemStat};
use crate::error::DashResult;
use crate::routes::NavCard;
use crate::utils::{flash_contents, tolerate};
use actix_web::{web, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;
use serde_json::Value;

static ADMIN_CARDS: [NavCard; 6] = [
    NavCard {
        title: "User Status",
        description: "View and edit registered users.",
        href: "/admin/users",
    },
    NavCard {
        title: "Event Details",
        description: "Manage events and review event requests.",
        href: "/admin/events",
    },
    NavCard {
        title: "Event Requests",
        description: "Approve or decline submitted events.",
        href: "/admin/event_requests",
    },
    NavCard {
        title: "News Feed",
        description: "Publish campus news.",
        href: "/admin/news",
    },
    NavCard {
        title: "Lecture Schedule",
        description: "Schedule lectures.",
        href: "/admin/lectures",
    },
    NavCard {
        title: "MongoDB Interface",
        description: "Browse and edit raw documents.",
        href: "/admin/documents",
    },
];

#[derive(Template)]
#[template(path = "dashboard.html")]
pub(crate) struct DashboardTemplate {
    pub title: &'static str,
    pub email: String,
    pub flash_messages: Vec<String>,
    pub monitor: Vec<MonitorPoint>,
    pub crowd_records: usize,
    pub crowd_latest: Vec<(String, String)>,
    pub cards: &'static [NavCard],
}

impl DashboardTemplate {
    /// System monitor and crowd summary shared by the dashboards.
    pub(crate) async fn load(
        title: &'static str,
        cards: &'static [NavCard],
        client: &BackendClient,
        token: &BearerToken,
        email: &AdminEmail,
        flash_messages: IncomingFlashMessages,
    ) -> DashResult<Self> {
        let stats: Vec<SystemStat> = tolerate(
            client.fetch_records("admin_sys_stats", token).await,
            "system stats",
        )?;
        let crowd = tolerate(
            client.fetch_collection("crowd_uplink", token).await,
            "crowd uplink",
        )?;
        let crowd_latest = crowd
            .last()
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .filter(|(key, value)| *key != "_id" && !value.is_object() && !value.is_array())
                    .map(|(key, value)| (key.to_owned(), display_value(value)))
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            title,
            email: email.to_string(),
            flash_messages: flash_contents(flash_messages),
            monitor: monitor_points(&stats),
            crowd_records: crowd.len(),
            crowd_latest,
            cards,
        })
    }
}

#[tracing::instrument(name = "Show admin dashboard", skip_all, fields(email=%&*email))]
pub async fn admin_dashboard(
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    email: web::ReqData<AdminEmail>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    DashboardTemplate::load(
        "Admin Dashboard",
        &ADMIN_CARDS,
        &client,
        &token,
        &email,
        flash_messages,
    )
    .await
}
