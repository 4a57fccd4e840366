//! Detect command implementation

use super::read_input;
use crate::config::load_config_or_default;
use crate::core::Engine;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Text to scan; reads --input or stdin when omitted
    pub text: Option<String>,

    /// Read input from a file instead of the argument or stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Language of the input text
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Emit spans as JSON instead of the table view
    #[arg(long)]
    pub json: bool,
}

impl DetectArgs {
    /// Execute the detect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let text = match read_input(self.text.as_deref(), self.input.as_deref()) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(5);
            }
        };

        let engine = Engine::new(&config).await?;
        let spans = match engine.detect(&text, &self.language).await {
            Ok(spans) => spans,
            Err(e) => {
                eprintln!("❌ Request rejected: {e}");
                return Ok(3);
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&spans)?);
            return Ok(0);
        }

        if spans.is_empty() {
            println!("No sensitive spans detected.");
            return Ok(0);
        }

        println!("Detected {} span(s):", spans.len());
        for span in &spans {
            println!(
                "  {:>5}..{:<5} {:<24} score={:.3} method={} text={:?}",
                span.start,
                span.end,
                span.category.label(),
                span.score,
                span.method.as_str(),
                &text[span.start..span.end]
            );
        }

        Ok(0)
    }
}
