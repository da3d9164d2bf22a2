// File: rhtmx-formguard/src/dropzone.rs
// Purpose: File-upload labels that accept dragged files

use serde::Serialize;

use crate::field::{DroppedFile, FieldKind};
use crate::form::Form;

/// Drag events delivered to a drop target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    DragOver,
    DragLeave,
    DragOut,
    Drop(Vec<DroppedFile>),
}

/// A label bound to a hidden file input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropZone {
    /// Name of the file input receiving dropped files
    pub input: String,
    /// Something is currently dragged over the label
    pub dragging: bool,
    /// The label has received a drop
    pub dropped: bool,
}

impl DropZone {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            dragging: false,
            dropped: false,
        }
    }

    /// Apply an event; returns whether the browser default is prevented
    pub fn handle(&mut self, event: DragEvent, form: &mut Form) -> bool {
        match event {
            DragEvent::DragOver => {
                self.dragging = true;
                true
            }
            DragEvent::DragLeave | DragEvent::DragOut => {
                self.dragging = false;
                false
            }
            DragEvent::Drop(files) => {
                match form.field_mut(&self.input) {
                    Some(field) if field.kind == FieldKind::File => {
                        tracing::debug!("{} file(s) dropped on '{}'", files.len(), self.input);
                        field.files = files;
                    }
                    _ => tracing::warn!("Drop target '{}' is not a file input", self.input),
                }
                self.dragging = false;
                self.dropped = true;
                true
            }
        }
    }
}
