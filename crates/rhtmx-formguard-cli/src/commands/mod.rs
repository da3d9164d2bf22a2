pub mod check;
pub mod submit;
pub mod translate;

use anyhow::{anyhow, bail, Context, Result};
use rhtmx_formguard::{Config, Form, FormSession, HttpBackend};
use std::sync::Arc;

use crate::FormArgs;

/// Load the form, apply `--set` values and open a session on the HTTP backend
pub fn open_session(config: &Config, args: &FormArgs) -> Result<FormSession> {
    let mut form = Form::from_file(&args.form)?;

    for assignment in &args.values {
        let (name, value) = parse_assignment(assignment)?;
        let field = form
            .field_mut(name)
            .ok_or_else(|| anyhow!("Form has no field named '{}'", name))?;
        field.value = value.to_string();
    }

    let backend = HttpBackend::new(&config.backend)
        .with_context(|| format!("Failed to set up backend for {}", config.backend.base_url))?;

    Ok(FormSession::new(form, Arc::new(backend), config))
}

fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("Expected NAME=VALUE, got '{}'", raw),
    }
}
