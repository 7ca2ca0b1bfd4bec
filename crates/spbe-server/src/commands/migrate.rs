use spbe_config::SpbeConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;

/// Handle `spbe migrate`. Opening the database applies pending migrations.
pub async fn handle(config: &SpbeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    bootstrap::open_database(&config.database).await?;
    tracing::info!("database schema is up to date");
    if !flags.quiet {
        println!("migrations applied");
    }
    Ok(())
}
