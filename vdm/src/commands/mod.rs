mod check;
mod completions;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;

use crate::logging::LogLevel;

#[derive(Parser)]
#[command(name = "vdmgen")]
#[command(version)]
#[command(about = "Generate TypeScript client packages from OData service metadata")]
pub(crate) struct Cli {
    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Verbose
        } else if self.quiet {
            LogLevel::Quiet
        } else {
            LogLevel::Normal
        }
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one TypeScript package per metadata document
    Generate(GenerateCommand),

    /// Validate metadata documents without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_flags() {
        let cli = Cli::parse_from(["vdmgen", "-v", "check", "--input-dir", "specs"]);
        assert_eq!(cli.log_level(), LogLevel::Verbose);

        let cli = Cli::parse_from(["vdmgen", "check", "--input-dir", "specs", "--quiet"]);
        assert_eq!(cli.log_level(), LogLevel::Quiet);

        assert!(Cli::try_parse_from(["vdmgen", "-v", "-q", "check", "--input-dir", "x"]).is_err());
    }
}
