// File: rhtmx-formguard/src/lib.rs
// Purpose: Main entry point for rhtmx-formguard library

//! # rhtmx-formguard
//!
//! Attribute-driven form validation for RHTMX pages.
//!
//! Fields opt in with the `validate` class and declare their rules as
//! attributes (`empty`, `must_be_equal_to`, `in-group`, `not-in-group`).
//! Edits are debounced, failing rules show translated messages, the submit
//! control follows the overall form validity, and submission happens
//! asynchronously with server-side field errors mapped back onto the form.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rhtmx_formguard::{Config, Form, FormMethod, FormSession, HttpBackend, InputField};
//! use std::sync::Arc;
//!
//! let config = Config::load_default()?;
//! let backend = Arc::new(HttpBackend::new(&config.backend)?);
//!
//! let form = Form::new("/signup", FormMethod::Post)
//!     .with_field(InputField::new("email").validated().with_attr("not-in-group", "emails"));
//!
//! let session = FormSession::new(form, backend, &config);
//! session.input("email", "a@b.com").await;
//! ```

pub mod backend;
pub mod config;
pub mod debounce;
pub mod dropzone;
pub mod error;
pub mod field;
pub mod form;
pub mod messages;
pub mod session;
pub mod submit;
pub mod translation;
pub mod validators;

// Re-export main types
pub use backend::{Backend, HttpBackend, MemoryBackend, ServerFieldError, SubmitRequest, SubmitResponse};
pub use config::{Config, DebounceScope};
pub use debounce::Debouncer;
pub use dropzone::{DragEvent, DropZone};
pub use error::FormGuardError;
pub use field::{Constraint, DroppedFile, FieldKind, FieldState, InputField};
pub use form::{Form, FormMethod};
pub use messages::{ErrorMessage, MessageBoard};
pub use session::FormSession;
pub use submit::SubmitOutcome;
pub use translation::TranslationCache;
