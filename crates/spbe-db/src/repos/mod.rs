//! Repository modules implementing the SPBE operations.
//!
//! Each module adds methods to `SpbeService` via `impl SpbeService` blocks.

pub mod cleanup;
pub mod credential;
pub mod dashboard;
pub mod evidence;
pub mod indicator;
pub mod profile;
pub mod seed;
pub mod taxonomy;
pub mod unit;
pub mod verification;
