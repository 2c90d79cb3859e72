//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mig - apply numbered SQL migration scripts in order
#[derive(Parser, Debug)]
#[command(name = "mig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true, env = "MIG_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new, empty migration file with the next version
    Make(MakeArgs),

    /// Apply every migration newer than the current version
    #[command(alias = "migrate")]
    Run(RunArgs),
}

/// Arguments for the make command
#[derive(Args, Debug)]
pub struct MakeArgs {
    /// Migration description; spaces become hyphens in the file name
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

impl MakeArgs {
    /// All name words joined with single spaces
    pub fn description(&self) -> String {
        self.name.join(" ")
    }
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
