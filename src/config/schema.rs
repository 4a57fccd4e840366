//! Configuration schema types
//!
//! Root structure mapping to `aegis.toml`. Every section has serde defaults
//! so an absent file resolves to a runnable degraded-mode configuration.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Aegis configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AegisConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Remote NER capability
    #[serde(default)]
    pub ner: NerConfig,

    /// Detection tuning (thresholds, keyword scoring, pattern library)
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Replacement table overrides
    #[serde(default)]
    pub replacement: ReplacementConfig,

    /// Audit logging
    #[serde(default)]
    pub audit: AuditConfig,

    /// Structured logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AegisConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message naming the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.ner.validate()?;
        self.detection.validate()?;
        self.replacement.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum accepted input length in bytes; longer inputs are rejected
    /// before detection
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        if self.max_text_len == 0 {
            return Err("max_text_len must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            max_text_len: default_max_text_len(),
        }
    }
}

/// Remote NER capability configuration
///
/// When `enabled` is false, or the endpoint cannot be reached at startup,
/// the process runs in degraded (pattern + fallback) mode for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerConfig {
    /// Whether to attempt NER initialization at startup
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the NER analyzer service
    #[serde(default = "default_ner_base_url")]
    pub base_url: String,

    /// Model identifier expected at the endpoint, reported via health
    #[serde(default = "default_ner_model_id")]
    pub model_id: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_ner_timeout_secs")]
    pub timeout_secs: u64,

    /// Startup probe attempts before entering degraded mode
    #[serde(default = "default_ner_startup_retries")]
    pub startup_retries: u32,

    /// Optional API key sent as a bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,
}

impl NerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled {
            url::Url::parse(&self.base_url)
                .map_err(|e| format!("Invalid ner.base_url '{}': {}", self.base_url, e))?;
            if self.timeout_secs == 0 {
                return Err("ner.timeout_secs must be greater than zero".to_string());
            }
        }
        Ok(())
    }
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_ner_base_url(),
            model_id: default_ner_model_id(),
            timeout_secs: default_ner_timeout_secs(),
            startup_retries: default_ner_startup_retries(),
            api_key: None,
        }
    }
}

/// Detection tuning
///
/// The keyword window and boost are deliberately explicit configuration so
/// tests can assert exact confidence values rather than relying on opaque
/// scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum score for ML-detected spans
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f32,

    /// Characters searched on each side of a pattern match for a context
    /// keyword
    #[serde(default = "default_keyword_window")]
    pub keyword_window: usize,

    /// Confidence added when a context keyword is found in the window
    #[serde(default = "default_keyword_boost")]
    pub keyword_boost: f32,

    /// Supported language tags; requests in other languages are rejected
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Optional external pattern library (TOML); the embedded library is
    /// used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_library: Option<PathBuf>,
}

impl DetectionConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(format!(
                "detection.score_threshold must be in [0.0, 1.0], got {}",
                self.score_threshold
            ));
        }
        if !(0.0..=1.0).contains(&self.keyword_boost) {
            return Err(format!(
                "detection.keyword_boost must be in [0.0, 1.0], got {}",
                self.keyword_boost
            ));
        }
        if self.keyword_window > 10_000 {
            return Err("detection.keyword_window is unreasonably large".to_string());
        }
        if self.languages.is_empty() {
            return Err("detection.languages must not be empty".to_string());
        }
        if let Some(ref path) = self.pattern_library {
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(format!(
                    "detection.pattern_library must be a TOML file: {}",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            score_threshold: default_score_threshold(),
            keyword_window: default_keyword_window(),
            keyword_boost: default_keyword_boost(),
            languages: default_languages(),
            pattern_library: None,
        }
    }
}

/// Replacement table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementConfig {
    /// Optional external replacement table (TOML) overriding the built-in
    /// category tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_path: Option<PathBuf>,
}

impl ReplacementConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.table_path {
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(format!(
                    "replacement.table_path must be a TOML file: {}",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

impl Default for ReplacementConfig {
    fn default() -> Self {
        Self { table_path: None }
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable per-request audit entries
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines format (plain text otherwise)
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path must be set when audit is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a rolling local file in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !["daily", "hourly"].contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be daily or hourly",
                self.local_rotation
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_text_len() -> usize {
    1_000_000
}

fn default_ner_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_ner_model_id() -> String {
    "en_core_web_lg".to_string()
}

fn default_ner_timeout_secs() -> u64 {
    30
}

fn default_ner_startup_retries() -> u32 {
    3
}

fn default_score_threshold() -> f32 {
    0.7
}

fn default_keyword_window() -> usize {
    30
}

fn default_keyword_boost() -> f32 {
    0.2
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/aegis.log")
}

fn default_audit_json_format() -> bool {
    true
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AegisConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.ner.enabled);
        assert_eq!(config.detection.score_threshold, 0.7);
        assert_eq!(config.detection.keyword_window, 30);
        assert_eq!(config.detection.keyword_boost, 0.2);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AegisConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_threshold() {
        let mut config = AegisConfig::default();
        config.detection.score_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ner_url_validated_only_when_enabled() {
        let mut config = AegisConfig::default();
        config.ner.base_url = "not a url".to_string();
        assert!(config.validate().is_ok());
        config.ner.enabled = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rotation_values() {
        let mut config = AegisConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
        config.logging.local_rotation = "hourly".to_string();
        assert!(config.validate().is_ok());
    }
}
