//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// Aegis - PII/PHI detection and redaction
#[derive(Parser, Debug)]
#[command(name = "aegis")]
#[command(version, about, long_about = None)]
#[command(author = "Aegis Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "aegis.toml", env = "AEGIS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "AEGIS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize text from an argument, file, or stdin
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Detect sensitive spans without rewriting the text
    Detect(commands::detect::DetectArgs),

    /// Show engine mode and detection stack status
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
