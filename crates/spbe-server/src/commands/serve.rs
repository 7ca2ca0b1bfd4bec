use std::time::Duration;

use spbe_config::SpbeConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;
use crate::http::server::run_server;
use crate::sweeper;

/// Handle `spbe serve`.
pub async fn handle(
    args: &ServeArgs,
    mut config: SpbeConfig,
    _flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    let bind_addr = config.server.bind_addr();
    let interval = Duration::from_secs(config.storage.cleanup_interval_secs.max(1));
    let max_attempts = config.storage.cleanup_max_attempts;

    let state = bootstrap::build_state(config).await?;
    let sweeper = sweeper::spawn(
        std::sync::Arc::clone(&state.db),
        std::sync::Arc::clone(&state.blobs),
        interval,
        max_attempts,
    );

    let result = run_server(state, &bind_addr).await;
    sweeper.abort();
    result
}
