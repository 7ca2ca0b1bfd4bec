use spbe_config::SpbeConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: SpbeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::handle(&args, config, flags).await,
        Commands::Migrate => commands::migrate::handle(&config, flags).await,
        Commands::Seed(args) => commands::seed::handle(&args, &config, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
