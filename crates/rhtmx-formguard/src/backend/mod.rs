//! Backends answering translation, group-membership and submission requests

use crate::error::Result;
use crate::form::FormMethod;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::MemoryBackend;

/// Trait for the server side a form session talks to
#[async_trait]
pub trait Backend: Send + Sync {
    /// Localized string for a message label (`GET /{lang}/translation/{label}`)
    async fn translation(&self, lang: &str, label: &str) -> Result<String>;

    /// Whether `candidate` belongs to `group` (`POST /validate/{group}`)
    async fn group_contains(&self, group: &str, candidate: &str) -> Result<bool>;

    /// Send a serialized form to its declared action
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse>;

    /// Get backend name
    fn name(&self) -> &'static str;
}

/// Body of a group-membership check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCheckRequest {
    pub candidate: String,
}

/// Answer to a group-membership check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCheckResponse {
    pub valid: bool,
}

/// A serialized form ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub action: String,
    pub method: FormMethod,
    /// `application/x-www-form-urlencoded` body
    pub body: String,
}

/// Status and decoded JSON body of a submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResponse {
    pub status: u16,
    /// `Value::Null` when the body was not JSON
    pub body: Value,
}

/// A field error reported by the server after a rejected submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFieldError {
    pub field: String,
    pub message: String,
}

impl SubmitResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `redirect_url` of a successful response, if it is a string
    pub fn redirect_url(&self) -> Option<&str> {
        self.body.get("redirect_url").and_then(Value::as_str)
    }

    /// Entries of the `errors` list that have the expected shape
    pub fn field_errors(&self) -> Vec<ServerFieldError> {
        self.body
            .get("errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| serde_json::from_value(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Path of the translation endpoint for a label
pub fn translation_path(lang: &str, label: &str) -> String {
    format!(
        "/{}/translation/{}",
        urlencoding::encode(lang),
        urlencoding::encode(label)
    )
}

/// Path of the group-membership endpoint
pub fn group_path(group: &str) -> String {
    format!("/validate/{}", urlencoding::encode(group))
}
