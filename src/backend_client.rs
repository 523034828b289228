//! src/backend_client.rs

use crate::domain::{CollectionName, DocumentId, NotificationEmail};
use crate::error::error_chain_fmt;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub type BackendResult<T> = Result<T, BackendError>;

#[derive(thiserror::Error)]
pub enum BackendError {
    #[error("The backend rejected the session token.")]
    Unauthorized,
    #[error("The backend answered with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to reach the backend.")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to decode the backend response: {0}")]
    Decode(String),
}

impl std::fmt::Debug for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Credential issued by the backend on login, attached to every request.
#[derive(Clone, Debug)]
pub struct BearerToken(Secret<String>);

impl BearerToken {
    pub fn new(token: Secret<String>) -> Self {
        Self(token)
    }

    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

#[derive(serde::Serialize)]
struct AdminLoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(serde::Deserialize)]
struct AdminLoginResponse {
    access_token: Option<String>,
}

/// Client of the campus-services REST backend.
///
/// Every screen of the dashboard goes through this client. Responses with
/// status 401 or 422, or a body reporting an expired session, are turned
/// into [`BackendError::Unauthorized`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the backend HTTP client.");
        Self {
            http_client,
            base_url,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let path: Vec<String> = segments
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect();
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.join("/"))
    }

    async fn send(&self, request: RequestBuilder, token: &BearerToken) -> BackendResult<Response> {
        let response = request.bearer_auth(token.expose_secret()).send().await?;
        check_status(response).await
    }

    /// Exchange admin credentials for a bearer token.
    ///
    /// Returns `Ok(None)` if the backend accepted the credentials but did not
    /// hand out a token.
    #[tracing::instrument(name = "Authenticate admin at backend", skip(self, password))]
    pub async fn authenticate_admin(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> BackendResult<Option<BearerToken>> {
        let body = AdminLoginRequest {
            email,
            password: password.expose_secret(),
        };
        let response = self
            .http_client
            .post(self.endpoint(&["auth", "admin"]))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response)
                .await
                .unwrap_or_else(|| format!("Login failed: {}", reason(status)));
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }
        let login: AdminLoginResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(login
            .access_token
            .filter(|t| !t.is_empty())
            .map(|t| BearerToken::new(Secret::new(t))))
    }

    #[tracing::instrument(name = "Fetch collection from backend", skip(self, token))]
    pub async fn fetch_collection(
        &self,
        table: &str,
        token: &BearerToken,
    ) -> BackendResult<Vec<Value>> {
        let request = self.http_client.get(self.endpoint(&["data", table, "fetch"]));
        let body = json_body(self.send(request, token).await?).await?;
        match body {
            Value::Array(documents) => Ok(documents),
            other => {
                tracing::warn!(body = %other, "Backend did not answer with a list of documents");
                Ok(Vec::new())
            }
        }
    }

    /// Fetch a collection and keep every document that parses as `T`.
    pub async fn fetch_records<T: DeserializeOwned>(
        &self,
        table: &str,
        token: &BearerToken,
    ) -> BackendResult<Vec<T>> {
        let documents = self.fetch_collection(table, token).await?;
        Ok(parse_records(table, documents))
    }

    #[tracing::instrument(name = "Fetch document from backend", skip(self, token))]
    pub async fn fetch_document(
        &self,
        table: &str,
        id: &DocumentId,
        token: &BearerToken,
    ) -> BackendResult<Value> {
        let request = self
            .http_client
            .get(self.endpoint(&["data", table, "fetch", id.as_ref()]));
        json_body(self.send(request, token).await?).await
    }

    pub async fn fetch_record<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &DocumentId,
        token: &BearerToken,
    ) -> BackendResult<T> {
        let document = self.fetch_document(table, id, token).await?;
        serde_json::from_value(document).map_err(|e| BackendError::Decode(e.to_string()))
    }

    #[tracing::instrument(name = "Count documents at backend", skip(self, token))]
    pub async fn count(&self, table: &str, token: &BearerToken) -> BackendResult<u64> {
        let request = self.http_client.get(self.endpoint(&["data", table, "count"]));
        let body = json_body(self.send(request, token).await?).await?;
        Ok(count_field(&body))
    }

    #[tracing::instrument(name = "Count matching documents at backend", skip(self, token))]
    pub async fn count_where(
        &self,
        table: &str,
        field: &str,
        value: &str,
        token: &BearerToken,
    ) -> BackendResult<u64> {
        let request = self
            .http_client
            .get(self.endpoint(&["data", table, "count"]))
            .query(&[("field", field), ("value", value), ("event_data_get", value)]);
        let body = json_body(self.send(request, token).await?).await?;
        Ok(count_field(&body))
    }

    #[tracing::instrument(name = "Store record at backend", skip(self, record, token))]
    pub async fn store<T: Serialize + ?Sized>(
        &self,
        table: &str,
        record: &T,
        token: &BearerToken,
    ) -> BackendResult<()> {
        let request = self
            .http_client
            .post(self.endpoint(&["data", table, "store"]))
            .json(record);
        self.send(request, token).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Create document at backend", skip(self, document, token))]
    pub async fn create_document(
        &self,
        table: &CollectionName,
        document: &Value,
        token: &BearerToken,
    ) -> BackendResult<()> {
        let request = self
            .http_client
            .post(self.endpoint(&["data", table.as_ref(), "create"]))
            .json(document);
        self.send(request, token).await?;
        Ok(())
    }

    /// Replace the fields of a document. The `_id` field is never sent.
    #[tracing::instrument(name = "Update document at backend", skip(self, document, token))]
    pub async fn update(
        &self,
        table: &str,
        id: &DocumentId,
        mut document: Value,
        token: &BearerToken,
    ) -> BackendResult<()> {
        if let Some(fields) = document.as_object_mut() {
            fields.remove("_id");
        }
        let request = self
            .http_client
            .put(self.endpoint(&["data", table, "update", id.as_ref()]))
            .json(&document);
        self.send(request, token).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Delete document at backend", skip(self, token))]
    pub async fn delete(
        &self,
        table: &str,
        id: &DocumentId,
        token: &BearerToken,
    ) -> BackendResult<()> {
        let request = self
            .http_client
            .delete(self.endpoint(&["data", table, "delete", id.as_ref()]));
        self.send(request, token).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Approve event request at backend", skip(self, token))]
    pub async fn approve_event_request(
        &self,
        id: &DocumentId,
        token: &BearerToken,
    ) -> BackendResult<()> {
        let request = self
            .http_client
            .post(self.endpoint(&["data", "event_requests", "approve", id.as_ref()]))
            .json(&serde_json::json!({}));
        self.send(request, token).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Add time to event request at backend", skip(self, token))]
    pub async fn add_event_request_time(
        &self,
        id: &DocumentId,
        time: &str,
        token: &BearerToken,
    ) -> BackendResult<()> {
        let request = self
            .http_client
            .post(self.endpoint(&["data", "event_requests", "add-time", id.as_ref()]))
            .json(&serde_json::json!({ "time": time }));
        self.send(request, token).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Create collection at backend", skip(self, token))]
    pub async fn create_collection(
        &self,
        name: &CollectionName,
        token: &BearerToken,
    ) -> BackendResult<()> {
        let request = self
            .http_client
            .post(self.endpoint(&["data", "create-collection"]))
            .json(&serde_json::json!({ "name": name.as_ref() }));
        self.send(request, token).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Hash password at backend", skip(self, plaintext, token))]
    pub async fn hash_password(
        &self,
        plaintext: &Secret<String>,
        token: &BearerToken,
    ) -> BackendResult<String> {
        let request = self
            .http_client
            .post(self.endpoint(&["custom", "hash-password"]))
            .json(&serde_json::json!({ "plaintext": plaintext.expose_secret() }));
        let body = json_body(self.send(request, token).await?).await?;
        body.get("hash")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| BackendError::Decode("response contains no `hash` field".into()))
    }

    #[tracing::instrument(
        name = "Send notification email via backend",
        skip(self, email, token),
        fields(recipient = %email.to)
    )]
    pub async fn send_email(
        &self,
        email: &NotificationEmail,
        token: &BearerToken,
    ) -> BackendResult<()> {
        let request = self
            .http_client
            .post(self.endpoint(&["email", "send"]))
            .json(email);
        self.send(request, token).await?;
        Ok(())
    }
}

fn reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown status")
}

async fn check_status(response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::UNPROCESSABLE_ENTITY {
        return Err(BackendError::Unauthorized);
    }
    if status.is_success() {
        return Ok(response);
    }
    let message = error_message(response)
        .await
        .unwrap_or_else(|| format!("Request failed: {}", reason(status)));
    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Error text of a failed response, taken from the `message` or `error` field.
async fn error_message(response: Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

async fn json_body(response: Response) -> BackendResult<Value> {
    let body: Value = response
        .json()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))?;
    if body.get("error").and_then(Value::as_str) == Some("Session expired") {
        return Err(BackendError::Unauthorized);
    }
    Ok(body)
}

fn count_field(body: &Value) -> u64 {
    body.get("count").and_then(Value::as_u64).unwrap_or(0)
}

fn parse_records<T: DeserializeOwned>(table: &str, documents: Vec<Value>) -> Vec<T> {
    documents
        .into_iter()
        .filter_map(|document| match serde_json::from_value(document) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(table, error.message = %e, "Skipping malformed document");
                None
            }
        })
        .collect()
}
