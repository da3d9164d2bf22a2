// File: rhtmx-formguard/src/field.rs
// Purpose: Input fields, their declarative attributes and derived constraints

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Class that opts a field into validation
pub const VALIDATE_CLASS: &str = "validate";

/// Attribute names recognised on input fields
pub mod attr {
    /// Presence suppresses the non-empty check
    pub const EMPTY: &str = "empty";
    pub const MUST_BE_EQUAL_TO: &str = "must_be_equal_to";
    pub const IN_GROUP: &str = "in-group";
    pub const NOT_IN_GROUP: &str = "not-in-group";
}

/// What kind of element the field is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    TextArea,
    File,
    Hidden,
}

/// Visual validation state of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    #[default]
    Untouched,
    Valid,
    Error,
}

/// A file handed over by a drop zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedFile {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub mime: Option<String>,
}

/// A single rule a field declares through its attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    NotEmpty,
    EqualTo(String),
    InGroup(String),
    NotInGroup(String),
}

impl Constraint {
    /// Translation label displayed when the constraint fails
    pub fn error_label(&self) -> &'static str {
        match self {
            Constraint::NotEmpty => "empty_input_field",
            Constraint::EqualTo(_) => "must_be_equal_to",
            Constraint::InGroup(_) => "not_in_group",
            Constraint::NotInGroup(_) => "in_group",
        }
    }

    /// Whether checking this constraint needs a backend round trip
    pub fn is_remote(&self) -> bool {
        matches!(self, Constraint::InGroup(_) | Constraint::NotInGroup(_))
    }
}

/// An input element of a form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputField {
    pub name: String,

    #[serde(default)]
    pub kind: FieldKind,

    #[serde(default)]
    pub value: String,

    /// Declarative attributes; presence is what matters for `empty`
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    #[serde(default)]
    pub classes: Vec<String>,

    #[serde(skip)]
    pub state: FieldState,

    /// Value seen by the last validation run
    #[serde(skip)]
    pub last_validated: Option<String>,

    /// Set while remote checks for this field are in flight
    #[serde(skip)]
    pub disabled: bool,

    #[serde(skip)]
    pub files: Vec<DroppedFile>,
}

impl InputField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            value: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            state: FieldState::Untouched,
            last_validated: None,
            disabled: false,
            files: Vec::new(),
        }
    }

    /// Tag the field with the `validate` class
    pub fn validated(mut self) -> Self {
        if !self.is_validated() {
            self.classes.push(VALIDATE_CLASS.to_string());
        }
        self
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn is_validated(&self) -> bool {
        self.classes.iter().any(|c| c == VALIDATE_CLASS)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Constraints declared by the attributes, in the order they are checked
    pub fn constraints(&self) -> Vec<Constraint> {
        let mut constraints = Vec::new();

        if !self.has_attr(attr::EMPTY) {
            constraints.push(Constraint::NotEmpty);
        }
        if let Some(expected) = self.attr(attr::MUST_BE_EQUAL_TO) {
            constraints.push(Constraint::EqualTo(expected.to_string()));
        }
        if let Some(group) = self.attr(attr::IN_GROUP) {
            constraints.push(Constraint::InGroup(group.to_string()));
        }
        if let Some(group) = self.attr(attr::NOT_IN_GROUP) {
            constraints.push(Constraint::NotInGroup(group.to_string()));
        }

        constraints
    }

    /// True when the current value was already validated and is non-empty
    pub fn is_unchanged_since_validation(&self) -> bool {
        !self.value.is_empty() && self.last_validated.as_deref() == Some(self.value.as_str())
    }
}
