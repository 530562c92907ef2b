use clap::Parser;
use std::path::PathBuf;

/// Build Summary - print the machines described by a build configuration
#[derive(Parser, Debug)]
#[command(name = "build-summary")]
#[command(about = "Prints a summary of the project and machines in build.yaml")]
#[command(version)]
pub struct Cli {
    /// Path to the build configuration (defaults to build.yaml next to the binary)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log a warning on stderr for every field missing from a record.
    ///
    /// The report itself is unchanged; absent fields still print as empty.
    #[arg(long)]
    pub warn_missing: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["build-summary"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.warn_missing);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_config_override() {
        let cli = Cli::try_parse_from(["build-summary", "--config", "/path/to/build.yaml"]).unwrap();
        assert_eq!(cli.config.unwrap().to_str().unwrap(), "/path/to/build.yaml");

        let cli = Cli::try_parse_from(["build-summary", "-c", "other.json"]).unwrap();
        assert_eq!(cli.config.unwrap().to_str().unwrap(), "other.json");
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["build-summary", "--warn-missing", "-v"]).unwrap();
        assert!(cli.warn_missing);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_positional() {
        assert!(Cli::try_parse_from(["build-summary", "build.yaml"]).is_err());
    }
}
