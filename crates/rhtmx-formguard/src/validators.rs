// File: rhtmx-formguard/src/validators.rs
// Purpose: One predicate per declarative constraint

use crate::backend::Backend;
use crate::field::Constraint;

/// Trimmed value is non-empty
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Value equals the attribute's literal
pub fn equals(value: &str, expected: &str) -> bool {
    value == expected
}

/// Value is a member of `group`; a failed lookup fails the check
pub async fn in_group(backend: &dyn Backend, group: &str, value: &str) -> bool {
    match backend.group_contains(group, value).await {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!("Group check '{}' failed: {}", group, e);
            false
        }
    }
}

/// Value is absent from `group`; a failed lookup fails the check
pub async fn not_in_group(backend: &dyn Backend, group: &str, value: &str) -> bool {
    match backend.group_contains(group, value).await {
        Ok(valid) => !valid,
        Err(e) => {
            tracing::warn!("Group check '{}' failed: {}", group, e);
            false
        }
    }
}

/// Run the validator registered for a constraint
pub async fn check(constraint: &Constraint, value: &str, backend: &dyn Backend) -> bool {
    match constraint {
        Constraint::NotEmpty => not_empty(value),
        Constraint::EqualTo(expected) => equals(value, expected),
        Constraint::InGroup(group) => in_group(backend, group, value).await,
        Constraint::NotInGroup(group) => not_in_group(backend, group, value).await,
    }
}
