//! Update types for entity mutations.
//!
//! Each update struct has `Option` fields. Only `Some` fields generate SET
//! clauses in the dynamic UPDATE SQL.

pub mod evidence;
