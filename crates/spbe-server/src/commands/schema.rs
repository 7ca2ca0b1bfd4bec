use anyhow::bail;
use schemars::schema_for;
use spbe_core::entities::{EvidenceDetail, IndicatorDetail, Profile, VerificationLogDetail};
use spbe_core::responses::DashboardStats;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;

pub const SCHEMA_TYPES: &[&str] = &["evidence", "profile", "stats", "log-entry", "indicator"];

/// JSON Schema for one of the API types in [`SCHEMA_TYPES`].
pub fn schema_json(type_name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name {
        "evidence" => schema_for!(EvidenceDetail),
        "profile" => schema_for!(Profile),
        "stats" => schema_for!(DashboardStats),
        "log-entry" => schema_for!(VerificationLogDetail),
        "indicator" => schema_for!(IndicatorDetail),
        other => bail!(
            "unknown schema type '{other}' (expected one of: {})",
            SCHEMA_TYPES.join(", ")
        ),
    };
    Ok(serde_json::to_value(schema)?)
}

/// Handle `spbe schema`.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_json(&args.type_name)?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
