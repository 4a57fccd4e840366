//! Configuration management
//!
//! TOML-based configuration loading, parsing, and validation with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `AEGIS_*` environment variable overrides
//! - Defaults for every section, so a missing file yields a runnable
//!   degraded-mode configuration
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aegis::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("aegis.toml")?;
//! println!("NER endpoint: {}", config.ner.base_url);
//! println!("Score threshold: {}", config.detection.score_threshold);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    AegisConfig, ApplicationConfig, AuditConfig, DetectionConfig, LoggingConfig, NerConfig,
    ReplacementConfig,
};
pub use secret::{SecretString, SecretValue};
