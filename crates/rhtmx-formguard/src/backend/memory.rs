//! In-memory backend
//!
//! Answers from tables held in memory and records every submission it
//! receives. Fast and deterministic, which is what tests want.

use crate::backend::{Backend, SubmitRequest, SubmitResponse};
use crate::error::{FormGuardError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory backend
#[derive(Clone)]
pub struct MemoryBackend {
    translations: Arc<RwLock<HashMap<(String, String), String>>>,
    groups: Arc<RwLock<HashMap<String, HashSet<String>>>>,
    response: Arc<RwLock<SubmitResponse>>,
    submissions: Arc<RwLock<Vec<SubmitRequest>>>,
    translation_lookups: Arc<AtomicUsize>,
    group_lookups: Arc<AtomicUsize>,
}

impl MemoryBackend {
    /// Create an empty backend whose submissions succeed with `{}`
    pub fn new() -> Self {
        Self {
            translations: Arc::new(RwLock::new(HashMap::new())),
            groups: Arc::new(RwLock::new(HashMap::new())),
            response: Arc::new(RwLock::new(SubmitResponse::new(200, Value::Object(Default::default())))),
            submissions: Arc::new(RwLock::new(Vec::new())),
            translation_lookups: Arc::new(AtomicUsize::new(0)),
            group_lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn insert_translation(&self, lang: &str, label: &str, text: &str) {
        self.translations
            .write()
            .await
            .insert((lang.to_string(), label.to_string()), text.to_string());
    }

    pub async fn insert_group_member(&self, group: &str, member: &str) {
        self.groups
            .write()
            .await
            .entry(group.to_string())
            .or_default()
            .insert(member.to_string());
    }

    /// Declare a group with no members
    pub async fn insert_group(&self, group: &str) {
        self.groups.write().await.entry(group.to_string()).or_default();
    }

    /// Set the response returned to every following submission
    pub async fn respond_with(&self, response: SubmitResponse) {
        *self.response.write().await = response;
    }

    pub async fn submissions(&self) -> Vec<SubmitRequest> {
        self.submissions.read().await.clone()
    }

    pub fn translation_lookups(&self) -> usize {
        self.translation_lookups.load(Ordering::SeqCst)
    }

    pub fn group_lookups(&self) -> usize {
        self.group_lookups.load(Ordering::SeqCst)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn translation(&self, lang: &str, label: &str) -> Result<String> {
        self.translation_lookups.fetch_add(1, Ordering::SeqCst);
        let translations = self.translations.read().await;
        translations
            .get(&(lang.to_string(), label.to_string()))
            .cloned()
            .ok_or_else(|| FormGuardError::Status {
                url: crate::backend::translation_path(lang, label),
                status: 404,
            })
    }

    async fn group_contains(&self, group: &str, candidate: &str) -> Result<bool> {
        self.group_lookups.fetch_add(1, Ordering::SeqCst);
        let groups = self.groups.read().await;
        groups
            .get(group)
            .map(|members| members.contains(candidate))
            .ok_or_else(|| FormGuardError::Status {
                url: crate::backend::group_path(group),
                status: 404,
            })
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse> {
        self.submissions.write().await.push(request.clone());
        Ok(self.response.read().await.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
