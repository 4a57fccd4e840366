//! Anonymize command implementation

use super::read_input;
use crate::config::load_config_or_default;
use crate::core::Engine;
use crate::domain::outcome::PipelineStatus;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Text to anonymize; reads --input or stdin when omitted
    pub text: Option<String>,

    /// Read input from a file instead of the argument or stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Pseudonym to preserve verbatim in the output
    #[arg(short, long)]
    pub pseudonym: Option<String>,

    /// Language of the input text
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Emit the full result as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let text = match read_input(self.text.as_deref(), self.input.as_deref()) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let engine = Engine::new(&config).await?;
        let result = match engine
            .anonymize(&text, self.pseudonym.as_deref(), &self.language)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                eprintln!("❌ Request rejected: {e}");
                return Ok(3); // Input validation exit code
            }
        };

        if result.status == PipelineStatus::EmergencyRedacted {
            eprintln!("⚠️  Internal failure; emergency redaction applied");
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", result.anonymized_text);
            tracing::info!(
                replacements = result.total_replacements(),
                status = ?result.status,
                "Anonymization complete"
            );
        }

        Ok(0)
    }
}
