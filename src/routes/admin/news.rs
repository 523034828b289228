//! src/routes/admin/news.rs

use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::NewsItem;
use crate::error::{DashResult, Error};
use crate::utils::{flash_contents, redirect_with_error, see_other};
use actix_web::{error::InternalError, web, HttpResponse, Responder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use askama_actix::Template;

const NEWS_TABLE: &str = "news";

#[derive(Template)]
#[template(path = "news.html")]
struct NewsTemplate {
    flash_messages: Vec<String>,
    news: Vec<NewsItem>,
}

#[tracing::instrument(name = "List news", skip_all)]
pub async fn news_page(
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    let news = client.fetch_records(NEWS_TABLE, &token).await?;
    Ok(NewsTemplate {
        flash_messages: flash_contents(flash_messages),
        news,
    })
}

#[tracing::instrument(name = "Publish news", skip_all, fields(news_title=%form.news_title))]
pub async fn publish_news(
    form: web::Form<NewsItem>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, "/admin/news");
    let item = form.0.validate().map_err(|e| redirect(e.into()))?;
    client
        .store(NEWS_TABLE, &item, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info("News published.").send();
    Ok(see_other("/admin/news"))
}
