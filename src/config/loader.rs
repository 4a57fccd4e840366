//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AegisConfig;
use crate::config::{SecretString, SecretValue};
use crate::domain::errors::AegisError;
use crate::domain::result::Result;
use regex::Regex;
use secrecy::Secret;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`AegisConfig`]
/// 4. Applies environment variable overrides (`AEGIS_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, the TOML is malformed, a
/// referenced environment variable is unset, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<AegisConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AegisError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AegisError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AegisConfig = toml::from_str(&contents)
        .map_err(|e| AegisError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AegisError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration from a file when present, defaults otherwise
///
/// CLI one-shot commands use this so `aegis anonymize` works without a
/// config file (degraded mode, embedded tables).
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AegisConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "No configuration file; using defaults");
        let mut config = AegisConfig::default();
        apply_env_overrides(&mut config)?;
        config.validate().map_err(|e| {
            AegisError::Configuration(format!("Configuration validation failed: {}", e))
        })?;
        Ok(config)
    }
}

/// Substitutes environment variables in the format `${VAR_NAME}`
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut missing_vars = Vec::new();

    let result = re.replace_all(input, |caps: &regex::Captures<'_>| {
        let var_name = &caps[1];
        match std::env::var(var_name) {
            Ok(value) => value,
            Err(_) => {
                missing_vars.push(var_name.to_string());
                String::new()
            }
        }
    });

    if !missing_vars.is_empty() {
        return Err(AegisError::Configuration(format!(
            "Missing environment variables referenced in configuration: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result.into_owned())
}

/// Applies `AEGIS_*` environment variable overrides
fn apply_env_overrides(config: &mut AegisConfig) -> Result<()> {
    if let Ok(val) = std::env::var("AEGIS_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("AEGIS_NER_ENABLED") {
        config.ner.enabled = val.parse().map_err(|_| {
            AegisError::Configuration(format!("Invalid AEGIS_NER_ENABLED value: {}", val))
        })?;
    }

    if let Ok(val) = std::env::var("AEGIS_NER_BASE_URL") {
        config.ner.base_url = val;
    }

    if let Ok(val) = std::env::var("AEGIS_NER_MODEL_ID") {
        config.ner.model_id = val;
    }

    if let Ok(val) = std::env::var("AEGIS_NER_API_KEY") {
        let secret: SecretString = Secret::new(SecretValue::from(val));
        config.ner.api_key = Some(secret);
    }

    if let Ok(val) = std::env::var("AEGIS_SCORE_THRESHOLD") {
        config.detection.score_threshold = val.parse().map_err(|_| {
            AegisError::Configuration(format!("Invalid AEGIS_SCORE_THRESHOLD value: {}", val))
        })?;
    }

    if let Ok(val) = std::env::var("AEGIS_AUDIT_ENABLED") {
        config.audit.enabled = val.parse().map_err(|_| {
            AegisError::Configuration(format!("Invalid AEGIS_AUDIT_ENABLED value: {}", val))
        })?;
    }

    if let Ok(val) = std::env::var("AEGIS_AUDIT_LOG_PATH") {
        config.audit.log_path = val.into();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("AEGIS_TEST_SUBST_VAR", "hello");
        let result = substitute_env_vars("value = \"${AEGIS_TEST_SUBST_VAR}\"").unwrap();
        assert_eq!(result, "value = \"hello\"");
        std::env::remove_var("AEGIS_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_missing_var_fails() {
        let result = substitute_env_vars("value = \"${AEGIS_TEST_DEFINITELY_UNSET}\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/aegis.toml");
        assert!(matches!(result, Err(AegisError::Configuration(_))));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = load_config_or_default("/nonexistent/aegis.toml").unwrap();
        assert!(!config.ner.enabled);
    }
}
