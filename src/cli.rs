use std::path::PathBuf;

use clap::{Parser, Subcommand};
use podshift::OutputFormat;

/// Podshift - translate Docker Compose documents into Podman-native artifacts
#[derive(Parser, Debug)]
#[command(name = "podshift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Use '-' as FILE to read the Compose document from stdin.")]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./podshift.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a Compose file into a Podman-native artifact
    Translate {
        /// Compose file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format id (podman-compose, quadlet, kube)
        #[arg(short, long, value_name = "ID")]
        format: Option<String>,

        /// Write the artifact to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Parse and run the rules, printing the change log only
    Check {
        /// Compose file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show a unified diff between the input and the translated artifact
    Diff {
        /// Compose file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format to diff against
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List the translation rules in execution order
    Rules,

    /// List the supported output formats
    Formats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["podshift"]).is_err());
    }

    #[test]
    fn test_cli_parse_translate() {
        let cli = Cli::try_parse_from(["podshift", "translate", "compose.yaml"]).unwrap();
        match cli.command {
            Commands::Translate {
                input,
                format,
                output,
            } => {
                assert_eq!(input, PathBuf::from("compose.yaml"));
                assert!(format.is_none());
                assert!(output.is_none());
            }
            _ => panic!("Expected Translate command"),
        }
    }

    #[test]
    fn test_cli_parse_translate_with_options() {
        let cli = Cli::try_parse_from([
            "podshift",
            "translate",
            "-",
            "--format",
            "quadlet",
            "-o",
            "out.container",
        ])
        .unwrap();
        match cli.command {
            Commands::Translate {
                input,
                format,
                output,
            } => {
                assert_eq!(input, PathBuf::from("-"));
                assert_eq!(format.as_deref(), Some("quadlet"));
                assert_eq!(output, Some(PathBuf::from("out.container")));
            }
            _ => panic!("Expected Translate command"),
        }
    }

    #[test]
    fn test_cli_translate_accepts_unknown_format_id() {
        // rejected later by the translator, with a translation error
        let cli =
            Cli::try_parse_from(["podshift", "translate", "a.yaml", "--format", "helm"]).unwrap();
        assert!(matches!(cli.command, Commands::Translate { .. }));
    }

    #[test]
    fn test_cli_parse_diff_format_alias() {
        let cli =
            Cli::try_parse_from(["podshift", "diff", "a.yaml", "--format", "kubernetes"]).unwrap();
        match cli.command {
            Commands::Diff { format, .. } => assert_eq!(format, Some(OutputFormat::Kube)),
            _ => panic!("Expected Diff command"),
        }
    }

    #[test]
    fn test_cli_diff_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["podshift", "diff", "a.yaml", "--format", "helm"]).is_err());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "podshift",
            "check",
            "a.yaml",
            "--json",
            "-vv",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_cli_parse_discovery_commands() {
        assert!(matches!(
            Cli::try_parse_from(["podshift", "rules"]).unwrap().command,
            Commands::Rules
        ));
        assert!(matches!(
            Cli::try_parse_from(["podshift", "formats"]).unwrap().command,
            Commands::Formats
        ));
    }
}
