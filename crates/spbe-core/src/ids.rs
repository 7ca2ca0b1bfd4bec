//! ID prefix constants.
//!
//! IDs are generated by `spbe-db` as `{prefix}-{8 hex chars}`. Reference data
//! (units, domains, aspects, indicators) keeps whatever IDs the seed file uses.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_EVIDENCE: &str = "bkt";
pub const PREFIX_VERIFICATION_LOG: &str = "vlg";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_USER, PREFIX_EVIDENCE, PREFIX_VERIFICATION_LOG];
