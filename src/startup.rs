//! src/startup.rs

use crate::authentication::reject_anonymous_users;
use crate::backend_client::BackendClient;
use crate::configuration::Settings;
use crate::routes::*;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{dev::Server, web, web::Data, App, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_lab::middleware::from_fn;
use secrecy::{ExposeSecret, Secret};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/// A new type to hold the newly built server and its port
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the listener and build the server from the configuration.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let backend_client = configuration.backend.client();

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            backend_client,
            configuration.application.hmac_secret,
        )
        .await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A more expressive name that makes it clear that
    /// this function only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

async fn run(
    listener: TcpListener,
    backend_client: BackendClient,
    hmac_secret: Secret<String>,
) -> Result<Server, anyhow::Error> {
    let backend_client = Data::new(backend_client);
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/login", web::get().to(login_form))
            .route("/login", web::post().to(login))
            .service(
                web::scope("/admin")
                    .wrap(from_fn(reject_anonymous_users))
                    .route("/dashboard", web::get().to(admin_dashboard))
                    .route("/logout", web::post().to(log_out))
                    .route("/users", web::get().to(users_page))
                    .route("/users/{user_id}", web::post().to(update_user))
                    .route("/events", web::get().to(events_page))
                    .route("/events", web::post().to(create_event))
                    .route("/events/export", web::get().to(export_events))
                    .route("/events/{event_id}/update", web::post().to(update_event))
                    .route("/events/{event_id}/delete", web::post().to(delete_event))
                    .route("/event_requests", web::get().to(event_requests_page))
                    .route(
                        "/event_requests/{request_id}/approve",
                        web::post().to(approve_event_request),
                    )
                    .route(
                        "/event_requests/{request_id}/reject",
                        web::post().to(reject_event_request),
                    )
                    .route(
                        "/event_requests/{request_id}/time",
                        web::post().to(add_event_request_time),
                    )
                    .route("/lectures", web::get().to(lectures_page))
                    .route("/lectures", web::post().to(schedule_lecture))
                    .route("/news", web::get().to(news_page))
                    .route("/news", web::post().to(publish_news))
                    .route("/documents", web::get().to(documents_page))
                    .route("/documents/collections", web::post().to(create_collection))
                    .route("/documents/hash_password", web::post().to(hash_password))
                    .route(
                        "/documents/{collection}/export",
                        web::get().to(export_documents),
                    )
                    .route("/documents/{collection}", web::post().to(create_document))
                    .route(
                        "/documents/{collection}/{document_id}/edit",
                        web::get().to(edit_document_form),
                    )
                    .route(
                        "/documents/{collection}/{document_id}/edit",
                        web::post().to(update_document),
                    )
                    .route(
                        "/documents/{collection}/{document_id}/delete",
                        web::post().to(delete_document),
                    ),
            )
            .service(
                web::scope("/mic")
                    .wrap(from_fn(reject_anonymous_users))
                    .route("/dashboard", web::get().to(mic_dashboard))
                    .route("/events", web::get().to(mic_events_page))
                    .route("/events/{event_id}/update", web::post().to(mic_update_event))
                    .route("/events/{event_id}/delete", web::post().to(mic_delete_event))
                    .route("/event_requests", web::post().to(submit_event_request))
                    .route("/analysis", web::get().to(mic_analysis)),
            )
            .service(
                web::scope("/vendor")
                    .wrap(from_fn(reject_anonymous_users))
                    .route("/orders", web::get().to(vendor_orders_page))
                    .route("/orders/{order_id}/complaint", web::post().to(file_complaint))
                    .route("/orders/{order_id}/{action}", web::post().to(update_order))
                    .route("/menu", web::get().to(vendor_menu_page))
                    .route("/menu", web::post().to(add_menu_item))
                    .route("/menu/{item_id}/delete", web::post().to(delete_menu_item))
                    .route("/analysis/sales", web::get().to(vendor_sales_analysis))
                    .route("/analysis/menu", web::get().to(vendor_menu_analysis)),
            )
            .app_data(backend_client.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
