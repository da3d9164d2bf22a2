// File: rhtmx-formguard/src/form.rs
// Purpose: A form, its fields, its error messages and its submit control

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::field::{FieldKind, FieldState, InputField};
use crate::messages::MessageBoard;

/// HTTP method declared by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormMethod {
    Get,
    #[default]
    Post,
}

/// An ordered set of fields with a derived overall validity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    #[serde(default = "default_action")]
    pub action: String,

    #[serde(default)]
    pub method: FormMethod,

    #[serde(default)]
    pub fields: Vec<InputField>,

    #[serde(skip)]
    pub messages: MessageBoard,

    /// Mirrors `!form_is_valid()` after every validation run
    #[serde(skip)]
    pub submit_disabled: bool,
}

fn default_action() -> String {
    "/".to_string()
}

impl Form {
    pub fn new(action: impl Into<String>, method: FormMethod) -> Self {
        Self {
            action: action.into(),
            method,
            fields: Vec::new(),
            messages: MessageBoard::new(),
            submit_disabled: false,
        }
    }

    pub fn with_field(mut self, field: InputField) -> Self {
        self.fields.push(field);
        self
    }

    /// Parse a form definition written in TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let form: Form = toml::from_str(content).context("Failed to parse form definition")?;
        Ok(form)
    }

    /// Load a form definition from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form definition: {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid form definition: {:?}", path))
    }

    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut InputField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn validated_fields(&self) -> impl Iterator<Item = &InputField> {
        self.fields.iter().filter(|f| f.is_validated())
    }

    /// True iff every validate-tagged field is currently valid
    pub fn form_is_valid(&self) -> bool {
        self.validated_fields().all(|f| f.state == FieldState::Valid)
    }

    /// Set the submit control's disabled state from the form validity
    pub fn refresh_submit_control(&mut self) -> bool {
        self.submit_disabled = !self.form_is_valid();
        self.submit_disabled
    }

    /// Attach a message to a field; `None` when no such field exists
    pub fn display_error(&mut self, field: &str, text: impl Into<String>) -> Option<u64> {
        self.field(field)?;
        Some(self.messages.push(field, text))
    }

    /// `application/x-www-form-urlencoded` body of the named, non-file fields
    pub fn serialize(&self) -> String {
        self.fields
            .iter()
            .filter(|f| !f.name.is_empty() && f.kind != FieldKind::File)
            .map(|f| {
                format!(
                    "{}={}",
                    encode_component(&f.name),
                    encode_component(&f.value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Wipe every input and text-area after a successful submission
    pub fn clear_values(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.files.clear();
            field.last_validated = None;
        }
    }
}

/// Form encoding uses `+` for spaces
fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}
