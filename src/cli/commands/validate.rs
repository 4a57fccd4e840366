//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Max Text Length: {} bytes", config.application.max_text_len);
        println!(
            "  NER: {}",
            if config.ner.enabled {
                format!("{} ({})", config.ner.base_url, config.ner.model_id)
            } else {
                "disabled (degraded mode)".to_string()
            }
        );
        println!("  Score Threshold: {}", config.detection.score_threshold);
        println!(
            "  Keyword Window/Boost: ±{} chars / +{}",
            config.detection.keyword_window, config.detection.keyword_boost
        );
        println!(
            "  Pattern Library: {}",
            config
                .detection
                .pattern_library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "embedded".to_string())
        );
        println!(
            "  Replacement Table: {}",
            config
                .replacement
                .table_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        println!(
            "  Audit: {}",
            if config.audit.enabled {
                config.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );

        Ok(0)
    }
}
