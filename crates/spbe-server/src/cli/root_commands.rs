use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Open the database and apply migrations.
    Migrate,
    /// Load reference data (units, domains, aspects, indicators) from TOML.
    Seed(SeedArgs),
    /// Print the JSON Schema of an API type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Debug, Args)]
pub struct SeedArgs {
    /// Reference data file
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: evidence, profile, stats, log-entry, indicator
    pub type_name: String,
}
