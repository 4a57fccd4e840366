//! Init command implementation
//!
//! Generates a starter `aegis.toml`.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "aegis.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Aegis configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::starter_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point ner.base_url at your analyzer service,");
                println!("     or leave ner.enabled = false for pattern-only detection");
                println!("  3. Set AEGIS_NER_API_KEY in the environment if the");
                println!("     analyzer requires authentication");
                println!("  4. Validate: aegis validate-config");
                println!("  5. Try it: echo 'SSN: 123-45-6789' | aegis anonymize");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Starter configuration content
    fn starter_config() -> &'static str {
        r#"# Aegis Configuration File
# PII/PHI detection and redaction engine

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"
# Inputs longer than this are rejected before detection
max_text_len = 1000000

[ner]
# Enable the remote NER analyzer. When false (or when initialization
# fails), the engine runs in degraded mode: pattern + fallback layers only.
enabled = false
base_url = "http://localhost:8080"
model_id = "en_core_web_lg"
timeout_secs = 30
startup_retries = 3
# api_key = "${AEGIS_NER_API_KEY}"

[detection]
# Minimum confidence for ML- and pattern-detected spans
score_threshold = 0.7
# Context keywords within this window (bytes, each side) boost pattern hits
keyword_window = 30
keyword_boost = 0.2
languages = ["en"]
# pattern_library = "patterns/recognizers.toml"

[replacement]
# table_path = "patterns/replacements.toml"

[audit]
# Per-request audit entries with SHA-256-hashed originals
enabled = false
log_path = "./audit/aegis.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_parses_and_validates() {
        let config: crate::config::AegisConfig =
            toml::from_str(InitArgs::starter_config()).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.ner.enabled);
        assert_eq!(config.detection.keyword_window, 30);
    }
}
