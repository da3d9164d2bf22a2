//! HTTP backend
//!
//! Talks to the application server with `reqwest`. All endpoints are
//! resolved relative to `base_url`; a form action that is already an
//! absolute URL is used as is.

use crate::backend::{
    group_path, translation_path, Backend, GroupCheckRequest, GroupCheckResponse, SubmitRequest,
    SubmitResponse,
};
use crate::config::BackendConfig;
use crate::error::{FormGuardError, Result};
use crate::form::FormMethod;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Backend reached over HTTP
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    /// Build a backend from configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| transport_error(&config.base_url, e))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path or absolute URL against the base URL
    pub fn url_for(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else if target.starts_with('/') {
            format!("{}{}", self.base_url, target)
        } else {
            format!("{}/{}", self.base_url, target)
        }
    }
}

fn transport_error(url: &str, source: reqwest::Error) -> FormGuardError {
    FormGuardError::Http {
        url: url.to_string(),
        source,
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn translation(&self, lang: &str, label: &str) -> Result<String> {
        let url = self.url_for(&translation_path(lang, label));
        tracing::debug!("Fetching translation: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        if !response.status().is_success() {
            return Err(FormGuardError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        response.text().await.map_err(|e| transport_error(&url, e))
    }

    async fn group_contains(&self, group: &str, candidate: &str) -> Result<bool> {
        let url = self.url_for(&group_path(group));
        tracing::debug!("Checking group membership: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&GroupCheckRequest {
                candidate: candidate.to_string(),
            })
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        if !response.status().is_success() {
            return Err(FormGuardError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(|e| transport_error(&url, e))?;
        let answer: GroupCheckResponse = serde_json::from_str(&body)?;
        Ok(answer.valid)
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse> {
        let url = self.url_for(&request.action);
        tracing::debug!("Submitting form to {} ({:?})", url, request.method);

        let builder = match request.method {
            FormMethod::Get => {
                let separator = if url.contains('?') { '&' } else { '?' };
                self.client.get(format!("{}{}{}", url, separator, request.body))
            }
            FormMethod::Post => self
                .client
                .post(&url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(request.body.clone()),
        };

        let response = builder.send().await.map_err(|e| transport_error(&url, e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| transport_error(&url, e))?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        Ok(SubmitResponse::new(status, body))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
