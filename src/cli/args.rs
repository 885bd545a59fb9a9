use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for pyqa
#[derive(Parser, Debug, Clone)]
#[command(name = "pyqa")]
#[command(about = "Run Python formatting and static-analysis tools over a source directory")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Target to run: help, autoformat or verify
    #[arg(value_name = "TARGET", default_value = "help")]
    pub target: String,

    /// Directory containing the source files (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR", env = "PYQA_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, value_name = "PATH", env = "PYQA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the commands that would run without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not echo commands; only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Default log filter for the chosen verbosity
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;

    #[test]
    fn target_defaults_to_help() {
        let args = Args::try_parse_from(["pyqa"]).unwrap();
        assert_eq!(args.target, "help");
        assert!(!args.dry_run);
        assert_eq!(args.log_level(), "info");
    }

    #[test]
    fn parses_target_and_options() {
        let args =
            Args::try_parse_from(["pyqa", "-C", "src", "-n", "--config", "ci.yaml", "verify"])
                .unwrap();
        assert_eq!(args.target, "verify");
        assert_eq!(args.directory, Some(PathBuf::from("src")));
        assert_eq!(args.config, Some(PathBuf::from("ci.yaml")));
        assert!(args.dry_run);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Args::try_parse_from(["pyqa", "-q", "-v", "verify"]).is_err());
    }

    #[test]
    fn verbosity_selects_log_level() {
        let verbose = Args::try_parse_from(["pyqa", "-v"]).unwrap();
        let quiet = Args::try_parse_from(["pyqa", "-q"]).unwrap();
        assert_eq!(verbose.log_level(), "debug");
        assert_eq!(quiet.log_level(), "error");
    }
}
