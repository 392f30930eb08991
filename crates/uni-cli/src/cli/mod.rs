use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `unidash` binary.
#[derive(Debug, Parser)]
#[command(
    name = "unidash",
    version,
    about = "University admin dashboard: records, KPIs, and bulk data upload"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides `api.base_url`)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            api_url: self.api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::{AuthCommands, EntityCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["unidash", "--format", "json", "--verbose", "dashboard"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Dashboard));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "unidash",
            "college",
            "list",
            "--format",
            "raw",
            "--api-url",
            "http://backend:8000/api",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(
            cli.global_flags().api_url.as_deref(),
            Some("http://backend:8000/api")
        );
        assert!(matches!(
            cli.command,
            Commands::College {
                action: EntityCommands::List
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["unidash", "--format", "xml", "dashboard"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn entity_mutations_collect_assignments() {
        let cli = Cli::try_parse_from([
            "unidash",
            "student",
            "update",
            "7",
            "--set",
            "name=Kim",
            "--set",
            "status=enrolled",
        ])
        .expect("cli should parse");

        let Commands::Student {
            action: EntityCommands::Update { id, set },
        } = cli.command
        else {
            panic!("expected student update");
        };
        assert_eq!(id, 7);
        assert_eq!(set, vec!["name=Kim", "status=enrolled"]);
    }

    #[test]
    fn login_requires_email() {
        assert!(Cli::try_parse_from(["unidash", "auth", "login"]).is_err());
        let cli = Cli::try_parse_from(["unidash", "auth", "login", "--email", "a@uni.edu"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Login(_)
            }
        ));
    }

    #[test]
    fn upload_needs_at_least_one_file() {
        assert!(Cli::try_parse_from(["unidash", "upload"]).is_err());
        let cli = Cli::try_parse_from(["unidash", "upload", "a.xlsx", "b.xlsx", "--csv"])
            .expect("cli should parse");
        let Commands::Upload(args) = cli.command else {
            panic!("expected upload");
        };
        assert_eq!(args.files.len(), 2);
        assert!(args.csv);
    }
}
