//! src/routes/admin/documents/post.rs

use super::{collection_page, DOCUMENTS_PAGE};
use crate::backend_client::{BackendClient, BearerToken};
use crate::domain::{
    apply_form_fields, parse_new_document, CollectionName, DocumentId, ValidationError,
};
use crate::error::Error;
use crate::session_state::TypedSession;
use crate::utils::{redirect_with_error, see_other};
use actix_web::{error::InternalError, web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::{ExposeSecret, Secret};

fn parse_collection(name: String) -> Result<CollectionName, InternalError<Error>> {
    CollectionName::parse(name).map_err(|e| redirect_with_error(e.into(), DOCUMENTS_PAGE))
}

/// Rebuild the document from the dot-notation form fields and store it.
#[tracing::instrument(name = "Update document", skip(form, client, token))]
pub async fn update_document(
    path: web::Path<(String, DocumentId)>,
    form: web::Form<Vec<(String, String)>>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let (collection, document_id) = path.into_inner();
    let collection = parse_collection(collection)?;
    let edit_page = format!(
        "{}/{}/{}/edit",
        DOCUMENTS_PAGE,
        urlencoding::encode(collection.as_ref()),
        urlencoding::encode(document_id.as_ref())
    );
    let redirect = |e: Error| redirect_with_error(e, &edit_page);
    let original = client
        .fetch_document(collection.as_ref(), &document_id, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    let document = apply_form_fields(&original, &form).map_err(|e| redirect(e.into()))?;
    client
        .update(collection.as_ref(), &document_id, document, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info("Document updated.").send();
    Ok(see_other(&collection_page(&collection)))
}

#[tracing::instrument(name = "Delete document", skip(client, token))]
pub async fn delete_document(
    path: web::Path<(String, DocumentId)>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let (collection, document_id) = path.into_inner();
    let collection = parse_collection(collection)?;
    let page = collection_page(&collection);
    client
        .delete(collection.as_ref(), &document_id, &token)
        .await
        .map_err(|e| redirect_with_error(e.into(), &page))?;
    FlashMessage::info("Document deleted.").send();
    Ok(see_other(&page))
}

#[derive(serde::Deserialize)]
pub struct NewDocumentFormData {
    #[serde(default)]
    json: String,
}

#[tracing::instrument(name = "Create document", skip(form, client, token))]
pub async fn create_document(
    collection: web::Path<String>,
    form: web::Form<NewDocumentFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let collection = parse_collection(collection.into_inner())?;
    let page = collection_page(&collection);
    let redirect = |e: Error| redirect_with_error(e, &page);
    let document = parse_new_document(&form.json).map_err(|e| redirect(e.into()))?;
    client
        .create_document(&collection, &document, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info("Document created.").send();
    Ok(see_other(&page))
}

#[derive(serde::Deserialize)]
pub struct NewCollectionFormData {
    #[serde(default)]
    name: String,
}

/// Create a collection and remember it for the rest of the session.
#[tracing::instrument(name = "Create collection", skip_all, fields(name=%form.name))]
pub async fn create_collection(
    form: web::Form<NewCollectionFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
    session: TypedSession,
) -> Result<HttpResponse, InternalError<Error>> {
    let redirect = |e: Error| redirect_with_error(e, DOCUMENTS_PAGE);
    let collection = CollectionName::parse(form.0.name).map_err(|e| redirect(e.into()))?;
    client
        .create_collection(&collection, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    session
        .add_created_collection(collection.as_ref())
        .map_err(redirect)?;
    FlashMessage::info(format!("Collection \"{}\" created.", collection)).send();
    Ok(see_other(&collection_page(&collection)))
}

#[derive(serde::Deserialize)]
pub struct HashPasswordFormData {
    #[serde(default = "empty_password")]
    password: Secret<String>,
    #[serde(default)]
    collection: String,
}

fn empty_password() -> Secret<String> {
    Secret::new(String::new())
}

/// Hash a plaintext password with the backend, e.g. to paste into a user
/// document. The hash is shown in a flash message.
#[tracing::instrument(name = "Hash password", skip_all)]
pub async fn hash_password(
    form: web::Form<HashPasswordFormData>,
    client: web::Data<BackendClient>,
    token: web::ReqData<BearerToken>,
) -> Result<HttpResponse, InternalError<Error>> {
    let HashPasswordFormData {
        password,
        collection,
    } = form.0;
    let page = CollectionName::parse(collection)
        .map(|c| collection_page(&c))
        .unwrap_or_else(|_| DOCUMENTS_PAGE.to_owned());
    let redirect = |e: Error| redirect_with_error(e, &page);
    if password.expose_secret().is_empty() {
        return Err(redirect(ValidationError::PasswordRequired.into()));
    }
    let hash = client
        .hash_password(&password, &token)
        .await
        .map_err(|e| redirect(e.into()))?;
    FlashMessage::info(format!("Password hash: {}", hash)).send();
    Ok(see_other(&page))
}
