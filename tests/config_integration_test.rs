//! Configuration loading, overrides, and external-table integration

use aegis::config::{load_config, load_config_or_default, AegisConfig};
use aegis::core::Engine;
use aegis::domain::AegisError;
use std::io::Write;

fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{content}").unwrap();
    path
}

#[test]
fn test_load_full_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(
        &dir,
        "aegis.toml",
        r#"
[application]
log_level = "debug"
max_text_len = 4096

[ner]
enabled = false
base_url = "http://ner.internal:8080"
model_id = "en_core_web_lg"

[detection]
score_threshold = 0.65
keyword_window = 40
keyword_boost = 0.25

[audit]
enabled = false
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.application.max_text_len, 4096);
    assert_eq!(config.detection.score_threshold, 0.65);
    assert_eq!(config.detection.keyword_window, 40);
    assert_eq!(config.detection.keyword_boost, 0.25);
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(
        &dir,
        "aegis.toml",
        r#"
[application]
log_level = "warn"
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.detection.score_threshold, 0.7);
    assert_eq!(config.detection.keyword_window, 30);
    assert!(!config.ner.enabled);
}

#[test]
fn test_env_substitution() {
    std::env::set_var("AEGIS_TEST_NER_HOST", "ner.example.test");
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(
        &dir,
        "aegis.toml",
        r#"
[ner]
enabled = false
base_url = "http://${AEGIS_TEST_NER_HOST}:8080"
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.ner.base_url, "http://ner.example.test:8080");
    std::env::remove_var("AEGIS_TEST_NER_HOST");
}

#[test]
fn test_invalid_values_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(
        &dir,
        "aegis.toml",
        r#"
[detection]
score_threshold = 3.5
"#,
    );

    let result = load_config(&path);
    assert!(matches!(result, Err(AegisError::Configuration(_))));
}

#[test]
fn test_malformed_toml_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "aegis.toml", "[detection\nbroken");
    assert!(matches!(
        load_config(&path),
        Err(AegisError::Configuration(_))
    ));
}

#[test]
fn test_missing_file_defaults() {
    let config = load_config_or_default("/definitely/not/here/aegis.toml").unwrap();
    assert_eq!(config.detection.score_threshold, 0.7);
}

#[tokio::test]
async fn test_custom_pattern_library_and_table() {
    let dir = tempfile::tempdir().unwrap();

    let library = write_temp(
        &dir,
        "recognizers.toml",
        r#"
[[fallback]]
name = "ticket_id"
category = "UNIQUE_IDENTIFIER"
regex = '\bTICKET-\d{6}\b'
score = 0.9
"#,
    );
    let table = write_temp(
        &dir,
        "replacements.toml",
        r#"
[tokens]
UNIQUE_IDENTIFIER = "ticket"
"#,
    );

    let mut config = AegisConfig::default();
    config.detection.pattern_library = Some(library);
    config.replacement.table_path = Some(table);

    let engine = Engine::new(&config).await.unwrap();
    let result = engine
        .anonymize("see TICKET-123456 for details", None, "en")
        .await
        .unwrap();
    assert_eq!(result.anonymized_text, "see ticket for details");
}

#[tokio::test]
async fn test_broken_pattern_library_fails_engine_construction() {
    let dir = tempfile::tempdir().unwrap();
    let library = write_temp(
        &dir,
        "recognizers.toml",
        r#"
[[fallback]]
name = "broken"
category = "SSN"
regex = "[unterminated"
"#,
    );

    let mut config = AegisConfig::default();
    config.detection.pattern_library = Some(library);

    let result = Engine::new(&config).await;
    assert!(matches!(result, Err(AegisError::Configuration(_))));
}
