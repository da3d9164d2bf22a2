// File: rhtmx-formguard/src/messages.rs
// Purpose: Inline error messages tied to a field by name

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An error message shown next to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub id: u64,
    pub field: String,
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

/// The messages currently on the page, in display order
#[derive(Debug, Clone, Default)]
pub struct MessageBoard {
    messages: Vec<ErrorMessage>,
    next_id: u64,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message and return its id
    pub fn push(&mut self, field: &str, text: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ErrorMessage {
            id,
            field: field.to_string(),
            text: text.into(),
            shown_at: Utc::now(),
        });
        id
    }

    /// Remove one message; false if it was already gone
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }

    /// Remove every message attached to a field, returning how many went
    pub fn clear_field(&mut self, field: &str) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| m.field != field);
        before - self.messages.len()
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ErrorMessage> + 'a {
        self.messages.iter().filter(move |m| m.field == field)
    }

    pub fn all(&self) -> &[ErrorMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_remove() {
        let mut board = MessageBoard::new();
        let first = board.push("email", "required");
        let second = board.push("email", "taken");
        assert_ne!(first, second);
        assert_eq!(board.len(), 2);

        assert!(board.remove(first));
        assert!(!board.remove(first));
        assert_eq!(board.all()[0].text, "taken");
    }

    #[test]
    fn test_clear_field_leaves_other_fields() {
        let mut board = MessageBoard::new();
        board.push("email", "required");
        board.push("email", "taken");
        board.push("name", "required");

        assert_eq!(board.clear_field("email"), 2);
        assert_eq!(board.for_field("email").count(), 0);
        assert_eq!(board.for_field("name").count(), 1);
    }
}
