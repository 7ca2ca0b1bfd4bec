use std::path::Path;

use anyhow::Context;
use spbe_config::SpbeConfig;
use spbe_db::repos::seed::{ReferenceData, SeedReport};
use spbe_db::service::SpbeService;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::SeedArgs;

/// Handle `spbe seed <file>`.
pub async fn handle(args: &SeedArgs, config: &SpbeConfig, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let db = bootstrap::open_database(&config.database).await?;
    let report = seed_from_file(&db, &args.file).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn seed_from_file(db: &SpbeService, path: &Path) -> anyhow::Result<SeedReport> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let data: ReferenceData =
        toml::from_str(&raw).with_context(|| format!("invalid reference data in {}", path.display()))?;

    let report = db
        .seed_reference(&data)
        .await
        .context("failed to seed reference data")?;
    tracing::info!(?report, file = %path.display(), "reference data seeded");
    Ok(report)
}
