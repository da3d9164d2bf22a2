// File: rhtmx-formguard/src/translation.rs
// Purpose: Session-lifetime cache of localized message strings

use crate::backend::Backend;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Label → localized string, filled lazily from the backend
///
/// Entries are never evicted. When two lookups for the same label race,
/// the first stored answer wins and both callers get it.
#[derive(Clone)]
pub struct TranslationCache {
    lang: String,
    backend: Arc<dyn Backend>,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl TranslationCache {
    pub fn new(lang: impl Into<String>, backend: Arc<dyn Backend>) -> Self {
        Self {
            lang: lang.into(),
            backend,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Cached string for `label`, fetching it on first use
    ///
    /// A failed lookup yields an empty string and is not cached.
    pub async fn get_translation(&self, label: &str) -> String {
        if let Some(text) = self.entries.read().await.get(label) {
            return text.clone();
        }

        match self.backend.translation(&self.lang, label).await {
            Ok(text) => {
                let mut entries = self.entries.write().await;
                entries.entry(label.to_string()).or_insert(text).clone()
            }
            Err(e) => {
                tracing::warn!("Translation lookup for '{}' failed: {}", label, e);
                String::new()
            }
        }
    }

    pub async fn cached(&self, label: &str) -> Option<String> {
        self.entries.read().await.get(label).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn test_lookup_is_cached() {
        let backend = MemoryBackend::new();
        backend.insert_translation("en", "empty_input_field", "This field is required").await;
        let cache = TranslationCache::new("en", Arc::new(backend.clone()));

        assert_eq!(cache.get_translation("empty_input_field").await, "This field is required");
        assert_eq!(cache.get_translation("empty_input_field").await, "This field is required");
        assert_eq!(backend.translation_lookups(), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_first_write_wins() {
        let backend = MemoryBackend::new();
        backend.insert_translation("en", "in_group", "first").await;
        let cache = TranslationCache::new("en", Arc::new(backend.clone()));

        assert_eq!(cache.get_translation("in_group").await, "first");

        // A later change on the server is not picked up during the session
        backend.insert_translation("en", "in_group", "second").await;
        assert_eq!(cache.get_translation("in_group").await, "first");
    }

    #[tokio::test]
    async fn test_failed_lookup_is_empty_and_retried() {
        let backend = MemoryBackend::new();
        let cache = TranslationCache::new("de", Arc::new(backend.clone()));

        assert_eq!(cache.get_translation("not_in_group").await, "");
        assert_eq!(cache.cached("not_in_group").await, None);

        backend.insert_translation("de", "not_in_group", "Nicht erlaubt").await;
        assert_eq!(cache.get_translation("not_in_group").await, "Nicht erlaubt");
        assert_eq!(backend.translation_lookups(), 2);
    }
}
