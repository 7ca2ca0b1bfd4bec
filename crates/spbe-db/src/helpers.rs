//! Column readers shared by the repositories.
//!
//! Timestamps are stored as TEXT. Rows written by this crate use RFC 3339 with
//! microseconds; rows written by `datetime('now')` in hand-run SQL use the
//! `SQLite` layout. Both parse to the same `DateTime<Utc>`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;

use crate::error::DatabaseError;

const SQLITE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Read a stored timestamp.
///
/// # Errors
///
/// `DatabaseError::InvalidState` when the text is in neither layout.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, SQLITE_DATETIME).map(|n| n.and_utc()))
        .map_err(|_| DatabaseError::InvalidState(format!("unreadable timestamp '{raw}'")))
}

/// Like [`parse_datetime`], with NULL and `""` read as `None`.
///
/// # Errors
///
/// See [`parse_datetime`].
pub fn parse_optional_datetime(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    raw.filter(|s| !s.is_empty()).map(parse_datetime).transpose()
}

/// Read a snake_case TEXT column into one of the `spbe-core` enums.
///
/// # Errors
///
/// `DatabaseError::InvalidState` for a value outside the enum.
pub fn parse_enum<T: DeserializeOwned>(raw: &str) -> Result<T, DatabaseError> {
    T::deserialize(serde::de::value::StrDeserializer::<serde::de::value::Error>::new(raw))
        .map_err(|_| DatabaseError::InvalidState(format!("unexpected stored value '{raw}'")))
}

/// Nullable TEXT. Empty strings count as absent.
///
/// # Errors
///
/// Propagates the libSQL read error.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?.filter(|s| !s.is_empty()))
}

/// Nullable INTEGER.
///
/// # Errors
///
/// Propagates the libSQL read error.
pub fn get_opt_i64(row: &libsql::Row, idx: i32) -> Result<Option<i64>, DatabaseError> {
    Ok(row.get::<Option<i64>>(idx)?)
}

/// The current instant and its stored form.
///
/// Microsecond precision keeps text order equal to time order, and the
/// instant is truncated to match what a later read returns.
#[must_use]
pub fn now_text() -> (DateTime<Utc>, String) {
    let now = Utc::now();
    let text = now.to_rfc3339_opts(SecondsFormat::Micros, true);
    (parse_datetime(&text).unwrap_or(now), text)
}
