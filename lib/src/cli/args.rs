//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Train, register and run the passenger survival model
#[derive(Parser, Debug, Clone)]
#[command(name = "titanic-survival")]
#[command(about = "Train, register and run the passenger survival model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct CliArgs {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format for command results
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from a config file and register it
    Train(TrainArgs),

    /// Predict survival for a CSV of passengers with a registered model
    Predict(PredictArgs),

    /// List the registered versions of a model
    Versions(VersionsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Model config (TOML)
    #[arg(short, long, env = "TITANIC_SURVIVAL_CONFIG")]
    pub config: PathBuf,

    /// Train and report without registering
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Registry root directory
    #[arg(short, long)]
    pub registry: PathBuf,

    /// Registered model name
    #[arg(short, long)]
    pub model: String,

    /// Version to load (default version when omitted)
    #[arg(long)]
    pub version: Option<String>,

    /// Input CSV with passenger columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct VersionsArgs {
    /// Registry root directory
    #[arg(short, long)]
    pub registry: PathBuf,

    /// Registered model name
    #[arg(short, long)]
    pub model: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}
