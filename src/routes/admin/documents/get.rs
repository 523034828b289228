//! src/routes/admin/documents/get.rs

use super::{collection_page, DOCUMENTS_PAGE};
use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::{
    display_value, form_fields, matches_search, scalar_columns, CollectionName, DocumentId,
    FormField, Pagination, DEFAULT_COLLECTIONS, PAGE_SIZES,
};
use crate::error::DashResult;
use crate::export::{attachment, documents_csv};
use crate::routes::SelectOption;
use crate::session_state::TypedSession;
use crate::telemetry::spawn_blocking_with_tracing;
use crate::utils::{flash_contents, tolerate};
use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{web, HttpResponse, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use anyhow::Context;
use askama_actix::Template;
use serde_json::Value;

#[derive(Debug, Default, serde::Deserialize)]
pub struct DocumentQuery {
    collection: Option<String>,
    page: Option<usize>,
    limit: Option<usize>,
    #[serde(default)]
    search: String,
    #[serde(default)]
    view: String,
}

pub struct DocumentRow {
    id: Option<DocumentId>,
    cells: Vec<String>,
    json: String,
}

impl DocumentRow {
    fn has_id(&self) -> bool {
        self.id.is_some()
    }

    fn id_str(&self) -> &str {
        self.id.as_ref().map(AsRef::as_ref).unwrap_or_default()
    }
}

#[derive(Template)]
#[template(path = "documents.html")]
struct DocumentsTemplate {
    flash_messages: Vec<String>,
    collections: Vec<SelectOption>,
    collection: String,
    search: String,
    json_view: bool,
    columns: Vec<String>,
    rows: Vec<DocumentRow>,
    pagination: Pagination,
    limit_options: Vec<SelectOption>,
    collection_link: String,
    search_param: String,
}

impl DocumentsTemplate {
    fn page_link(&self, page: usize) -> String {
        format!(
            "{}&page={}&limit={}{}{}",
            self.collection_link,
            page,
            self.pagination.limit,
            self.search_param,
            if self.json_view { "&view=json" } else { "" }
        )
    }

    fn previous_link(&self) -> String {
        self.page_link(self.pagination.page.saturating_sub(1).max(1))
    }

    fn next_link(&self) -> String {
        self.page_link(self.pagination.page + 1)
    }

    fn export_link(&self) -> String {
        let mut link = format!(
            "{}/{}/export",
            DOCUMENTS_PAGE,
            urlencoding::encode(&self.collection)
        );
        if !self.search.is_empty() {
            link.push_str(&format!("?search={}", urlencoding::encode(&self.search)));
        }
        link
    }

    fn view_link(&self, json: bool) -> String {
        format!(
            "{}&limit={}{}{}",
            self.collection_link,
            self.pagination.limit,
            self.search_param,
            if json { "&view=json" } else { "" }
        )
    }
}

/// Default collections followed by the ones created in this session.
fn known_collections(session: &TypedSession) -> DashResult<Vec<String>> {
    let mut collections: Vec<String> = DEFAULT_COLLECTIONS.iter().map(|c| c.to_string()).collect();
    for created in session.get_created_collections()? {
        if !collections.contains(&created) {
            collections.push(created);
        }
    }
    Ok(collections)
}

fn document_rows(documents: &[Value], columns: &[String]) -> Vec<DocumentRow> {
    documents
        .iter()
        .map(|document| DocumentRow {
            id: DocumentId::of(document),
            cells: columns
                .iter()
                .map(|c| document.get(c).map(display_value).unwrap_or_default())
                .collect(),
            json: serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string()),
        })
        .collect()
}

#[tracing::instrument(name = "Browse documents", skip(client, token, session, flash_messages))]
pub async fn documents_page(
    query: web::Query<DocumentQuery>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    session: TypedSession,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    let query = query.into_inner();
    let collection = match query.collection.filter(|c| !c.trim().is_empty()) {
        Some(name) => Some(CollectionName::parse(name)?),
        None => None,
    };
    let search = query.search.trim().to_owned();
    let (documents, total) = match &collection {
        Some(collection) => {
            let documents: Vec<Value> = client
                .fetch_collection(collection.as_ref(), &token)
                .await?
                .into_iter()
                .filter(|d| matches_search(d, &search))
                .collect();
            let total = if search.is_empty() {
                tolerate(
                    client
                        .count(collection.as_ref(), &token)
                        .await
                        .map(Some),
                    "document count",
                )?
                .unwrap_or(documents.len() as u64)
            } else {
                documents.len() as u64
            };
            (documents, total)
        }
        None => (Vec::new(), 0),
    };
    let pagination = Pagination::new(query.page, query.limit, total);
    let page = pagination.slice(&documents);
    let columns = scalar_columns(page);
    let collection_name = collection
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_default();
    let collections = known_collections(&session)?;
    let limits: Vec<String> = PAGE_SIZES.iter().map(|l| l.to_string()).collect();
    Ok(DocumentsTemplate {
        flash_messages: flash_contents(flash_messages),
        collections: SelectOption::from_values(&collections, &collection_name),
        collection_link: collection
            .as_ref()
            .map(collection_page)
            .unwrap_or_else(|| DOCUMENTS_PAGE.to_owned()),
        search_param: if search.is_empty() {
            String::new()
        } else {
            format!("&search={}", urlencoding::encode(&search))
        },
        collection: collection_name,
        json_view: query.view == "json",
        rows: document_rows(page, &columns),
        columns,
        limit_options: SelectOption::from_values(&limits, &pagination.limit.to_string()),
        pagination,
        search,
    })
}

#[derive(Template)]
#[template(path = "document_edit.html")]
struct DocumentEditTemplate {
    flash_messages: Vec<String>,
    collection: String,
    document_id: String,
    fields: Vec<FormField>,
    back_link: String,
}

#[tracing::instrument(name = "Edit document", skip(client, token, flash_messages))]
pub async fn edit_document_form(
    path: web::Path<(String, DocumentId)>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    flash_messages: IncomingFlashMessages,
) -> DashResult<impl Responder> {
    let (collection, document_id) = path.into_inner();
    let collection = CollectionName::parse(collection)?;
    let document = client
        .fetch_document(collection.as_ref(), &document_id, &token)
        .await?;
    Ok(DocumentEditTemplate {
        flash_messages: flash_contents(flash_messages),
        back_link: collection_page(&collection),
        collection: collection.to_string(),
        document_id: document_id.to_string(),
        fields: form_fields(&document),
    })
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    search: String,
}

/// CSV of every document in the collection that matches the search.
#[tracing::instrument(name = "Export documents", skip(client, token))]
pub async fn export_documents(
    collection: web::Path<String>,
    query: web::Query<ExportQuery>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> DashResult<HttpResponse> {
    let collection = CollectionName::parse(collection.into_inner())?;
    let search = query.search.trim().to_owned();
    let documents: Vec<Value> = client
        .fetch_collection(collection.as_ref(), &token)
        .await?
        .into_iter()
        .filter(|d| matches_search(d, &search))
        .collect();
    let csv = spawn_blocking_with_tracing(move || documents_csv(&documents))
        .await
        .context("Failed to spawn blocking task.")??;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((CONTENT_DISPOSITION, attachment(collection.as_ref())))
        .body(csv))
}
