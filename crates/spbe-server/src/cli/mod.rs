use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::GlobalFlags;
pub use root_commands::Commands;

/// Top-level CLI parser for the `spbe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "spbe",
    version,
    about = "SPBE evidence submission and verification service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML configuration file, layered above ./spbe.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_accepts_listener_overrides() {
        let cli = Cli::try_parse_from(["spbe", "serve", "--host", "127.0.0.1", "--port", "8080"])
            .expect("cli should parse");
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["spbe", "migrate", "--verbose", "--config", "prod.toml"])
            .expect("cli should parse");
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Migrate));

        let flags = cli.global_flags();
        assert_eq!(
            flags.config.as_deref(),
            Some(std::path::Path::new("prod.toml"))
        );
    }

    #[test]
    fn seed_requires_a_file() {
        assert!(Cli::try_parse_from(["spbe", "seed"]).is_err());
        let cli = Cli::try_parse_from(["spbe", "seed", "seed/reference.toml"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Seed(args) if args.file.ends_with("reference.toml")));
    }

    #[test]
    fn schema_takes_a_type_name() {
        let cli = Cli::try_parse_from(["spbe", "schema", "evidence"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Schema(args) if args.type_name == "evidence"));
    }
}
