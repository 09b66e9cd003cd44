//! HttpCodeApi - REST client for the document store and the execution service.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET  /code/{id}`
//! - `POST /code`
//! - `POST /run/run`

use std::time::Duration;

use async_trait::async_trait;
use codepad_core::api::{CodeApi, CodeDocument, RunRequest, RunResponse, SavedCode};
use codepad_core::config::ClientConfig;
use codepad_core::error::{CodepadError, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// [`CodeApi`] over HTTP with JSON bodies.
#[derive(Clone)]
pub struct HttpCodeApi {
    client: Client,
    base_url: String,
}

impl HttpCodeApi {
    /// Creates a client for `base_url` with the default reqwest settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Builds a client from the client configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| CodepadError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(config.api_base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| CodepadError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse response: {err}"),
            })
    }
}

#[async_trait]
impl CodeApi for HttpCodeApi {
    async fn fetch_code(&self, id: &str) -> Result<CodeDocument> {
        let url = self.endpoint(&format!("code/{id}"));
        tracing::debug!("[HttpCodeApi] GET {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CodepadError::not_found("Document", id));
        }
        Self::read_json(response).await
    }

    async fn save_code(&self, document: &CodeDocument) -> Result<SavedCode> {
        let url = self.endpoint("code");
        tracing::debug!("[HttpCodeApi] POST {} (id: {:?})", url, document.id);

        let response = self
            .client
            .post(&url)
            .json(document)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn run(&self, request: &RunRequest) -> Result<RunResponse> {
        let url = self.endpoint("run/run");
        tracing::debug!("[HttpCodeApi] POST {} (lang: {})", url, request.lang);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(alias = "error")]
    message: String,
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn map_http_error(status: StatusCode, body: String) -> CodepadError {
    let body = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.message)
        .unwrap_or(body);

    CodepadError::Http {
        status: status.as_u16(),
        body,
    }
}
