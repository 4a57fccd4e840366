//! Status command implementation
//!
//! Builds the engine from configuration and renders the health surface for
//! operational monitoring.

use crate::config::load_config_or_default;
use crate::core::Engine;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit the health snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking engine status");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let engine = match Engine::new(&config).await {
            Ok(engine) => engine,
            Err(e) => {
                println!("❌ Failed to initialize engine");
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let health = engine.health();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&health)?);
            return Ok(0);
        }

        println!("📊 Aegis Status");
        println!();
        if health.is_normal() {
            println!("  Mode:        ✅ normal (ML + pattern + fallback)");
        } else {
            println!("  Mode:        ⚠️  degraded (pattern + fallback only)");
        }
        println!(
            "  NER model:   {}",
            health.model_id.as_deref().unwrap_or("not loaded")
        );
        println!("  Recognizers: {}", health.recognizers.join(" → "));

        Ok(0)
    }
}
