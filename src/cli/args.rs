//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Compile a SCSS entry point to CSS, then rebuild on every change.
///
/// Running without arguments runs the default task: one build, then watch.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, default_value = "scsswatch.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Purge CSS rules not referenced by the HTML content set
    #[arg(short = 'P', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub purge: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_runs_default_task() {
        let cli = Cli::try_parse_from(["scsswatch"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("scsswatch.toml"));
        assert_eq!(cli.purge, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_purge_flag_forms() {
        let cli = Cli::try_parse_from(["scsswatch", "--purge"]).unwrap();
        assert_eq!(cli.purge, Some(true));

        let cli = Cli::try_parse_from(["scsswatch", "--purge", "false"]).unwrap();
        assert_eq!(cli.purge, Some(false));
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_and_version_flags() {
        let cli = Cli::try_parse_from(["scsswatch", "-v"]).unwrap();
        assert!(cli.verbose);

        let err = Cli::try_parse_from(["scsswatch", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["scsswatch", "build"]).is_err());
    }
}
