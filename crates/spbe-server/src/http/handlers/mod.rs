//! Route handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod evidence;
pub mod health;
pub mod reference;
pub mod upload;
pub mod verification;

/// Query-string values with empty strings treated as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
