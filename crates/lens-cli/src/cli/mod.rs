use clap::Parser;

pub mod commands;
pub mod global;

pub use commands::Commands;
pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `lens` binary.
#[derive(Debug, Parser)]
#[command(name = "lens", version, about = "Lens - grounded employer research reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_parses_all_options() {
        let cli = Cli::try_parse_from([
            "lens",
            "analyze",
            "Acme backend engineer Berlin",
            "--resume",
            "cv.txt",
            "--lang",
            "en",
            "--no-links",
        ])
        .expect("cli should parse");

        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.subject, "Acme backend engineer Berlin");
        assert_eq!(args.resume.as_deref(), Some(std::path::Path::new("cv.txt")));
        assert_eq!(args.lang.as_deref(), Some("en"));
        assert!(args.no_links);
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["lens", "--format", "raw", "--verbose", "status"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["lens", "plan", "Acme", "--location", "Berlin", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.location.as_deref(), Some("Berlin"));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["lens", "--format", "table", "status"]).is_err());
    }

    #[test]
    fn analyze_requires_subject() {
        assert!(Cli::try_parse_from(["lens", "analyze"]).is_err());
    }
}
