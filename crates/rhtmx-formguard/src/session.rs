// File: rhtmx-formguard/src/session.rs
// Purpose: Per-page state and the validation orchestrator

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backend::Backend;
use crate::config::{Config, ValidationConfig};
use crate::debounce::Debouncer;
use crate::dropzone::{DragEvent, DropZone};
use crate::field::FieldState;
use crate::form::Form;
use crate::translation::TranslationCache;
use crate::validators;

/// Everything the validation script keeps for one page
///
/// Cloning is cheap and yields a handle to the same session.
#[derive(Clone)]
pub struct FormSession {
    pub(crate) form: Arc<Mutex<Form>>,
    pub(crate) backend: Arc<dyn Backend>,
    translations: TranslationCache,
    debouncer: Debouncer,
    config: ValidationConfig,
    drop_zones: Arc<Mutex<HashMap<String, DropZone>>>,
}

impl FormSession {
    pub fn new(form: Form, backend: Arc<dyn Backend>, config: &Config) -> Self {
        tracing::debug!(
            "Opening form session for {} on {} backend (lang: {})",
            form.action,
            backend.name(),
            config.page.lang
        );
        let translations = TranslationCache::new(config.page.lang.clone(), backend.clone());
        let debouncer = Debouncer::new(
            config.validation.debounce(),
            config.validation.debounce_scope,
        );

        Self {
            form: Arc::new(Mutex::new(form)),
            backend,
            translations,
            debouncer,
            config: config.validation.clone(),
            drop_zones: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn translations(&self) -> &TranslationCache {
        &self.translations
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Copy of the form as it stands now
    pub async fn snapshot(&self) -> Form {
        self.form.lock().await.clone()
    }

    pub async fn form_is_valid(&self) -> bool {
        self.form.lock().await.form_is_valid()
    }

    /// Keystroke on a field: store the value and re-arm its validation
    ///
    /// Ignored while the field is disabled by an in-flight check.
    pub async fn input(&self, name: &str, value: impl Into<String>) {
        let validated = {
            let mut form = self.form.lock().await;
            match form.field_mut(name) {
                Some(field) if !field.disabled => {
                    field.value = value.into();
                    field.is_validated()
                }
                Some(_) => {
                    tracing::debug!("Ignoring input on disabled field '{}'", name);
                    return;
                }
                None => return,
            }
        };

        if validated {
            self.schedule_validation(name).await;
        }
    }

    /// Focus left a field: re-arm its validation
    ///
    /// Ignored while the field is disabled by an in-flight check.
    pub async fn blur(&self, name: &str) {
        let validated = self
            .form
            .lock()
            .await
            .field(name)
            .map(|f| f.is_validated() && !f.disabled)
            .unwrap_or(false);

        if validated {
            self.schedule_validation(name).await;
        }
    }

    async fn schedule_validation(&self, name: &str) {
        let session = self.clone();
        let field = name.to_string();
        self.debouncer
            .schedule(name, async move {
                session.validation_callback(&field).await;
            })
            .await;
    }

    /// Validate one field and refresh the submit control
    ///
    /// Returns the resulting state, or `None` for an unknown field.
    /// The field is disabled until the run, message lookups included,
    /// finishes. A call made while another run holds the field returns the
    /// current state.
    pub async fn validation_callback(&self, name: &str) -> Option<FieldState> {
        let (constraints, value) = {
            let mut form = self.form.lock().await;
            let Some(field) = form.field_mut(name) else {
                tracing::debug!("Validation requested for unknown field '{}'", name);
                return None;
            };

            if field.disabled {
                tracing::debug!("Validation of '{}' already in flight", name);
                return Some(field.state);
            }
            if field.is_unchanged_since_validation() {
                return Some(field.state);
            }

            let constraints = field.constraints();
            let value = field.value.clone();
            field.last_validated = Some(value.clone());
            field.disabled = true;

            form.messages.clear_field(name);
            (constraints, value)
        };

        let mut valid = true;
        for constraint in &constraints {
            if validators::check(constraint, &value, self.backend.as_ref()).await {
                continue;
            }
            valid = false;
            let text = self
                .translations
                .get_translation(constraint.error_label())
                .await;
            self.display_error(name, text).await;
        }

        let state = if valid {
            FieldState::Valid
        } else {
            FieldState::Error
        };

        let mut form = self.form.lock().await;
        if let Some(field) = form.field_mut(name) {
            field.state = state;
            field.disabled = false;
        }
        let submit_disabled = form.refresh_submit_control();
        tracing::debug!(
            "Field '{}' is {:?}, submit disabled: {}",
            name,
            state,
            submit_disabled
        );

        Some(state)
    }

    /// Validate every validate-tagged field in document order
    pub async fn validate_all(&self) -> bool {
        let names: Vec<String> = self
            .form
            .lock()
            .await
            .validated_fields()
            .map(|f| f.name.clone())
            .collect();

        for name in &names {
            self.validation_callback(name).await;
        }

        self.form_is_valid().await
    }

    /// Show a message under a field; it dismisses itself after the timeout
    pub async fn display_error(&self, name: &str, text: impl Into<String>) -> Option<u64> {
        let id = self.form.lock().await.display_error(name, text)?;

        let form = self.form.clone();
        let timeout = self.config.message_timeout();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            form.lock().await.messages.remove(id);
        });

        Some(id)
    }

    /// User clicked a message away
    pub async fn dismiss_message(&self, id: u64) -> bool {
        self.form.lock().await.messages.remove(id)
    }

    /// Register a drop zone for a file input
    pub async fn add_drop_zone(&self, input: &str) {
        self.drop_zones
            .lock()
            .await
            .insert(input.to_string(), DropZone::new(input));
    }

    /// Deliver a drag event; `None` when no zone targets `input`
    pub async fn drag(&self, input: &str, event: DragEvent) -> Option<bool> {
        let mut zones = self.drop_zones.lock().await;
        let zone = zones.get_mut(input)?;
        let mut form = self.form.lock().await;
        Some(zone.handle(event, &mut form))
    }

    pub async fn drop_zone(&self, input: &str) -> Option<DropZone> {
        self.drop_zones.lock().await.get(input).cloned()
    }
}
