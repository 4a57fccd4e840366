//! Audit logger for anonymization operations
//!
//! Writes one entry per request with SHA-256 hashes of the original values.
//! Plaintext sensitive text never reaches the audit file.

use crate::domain::outcome::AnonymizationResult;
use crate::domain::result::Result;
use crate::domain::AegisError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditEntry {
    id: Uuid,
    timestamp: String,
    status: String,
    mode: String,
    replacements: usize,
    processing_time_ms: u64,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed value)
#[derive(Debug, Serialize)]
struct AuditDetection {
    category: String,
    method: String,
    score: f32,
    /// SHA-256 hash of the original value; plaintext is never logged
    value_hash: String,
}

/// Audit logger
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create an audit logger, ensuring the log directory exists
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AegisError::Audit(format!(
                        "Failed to create audit log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Record one anonymization result
    pub fn log_result(&self, result: &AnonymizationResult) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditEntry {
            id: Uuid::new_v4(),
            timestamp: result.timestamp.to_rfc3339(),
            status: format!("{:?}", result.status),
            mode: result.mode.as_str().to_string(),
            replacements: result.spans.len(),
            processing_time_ms: result.processing_time_ms,
            detections: result
                .spans
                .iter()
                .map(|span| AuditDetection {
                    category: span.category.label().to_string(),
                    method: span.method.as_str().to_string(),
                    score: span.score,
                    value_hash: hash_value(&span.original),
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                AegisError::Audit(format!(
                    "Failed to open audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;

        if self.json_format {
            let line = serde_json::to_string(entry)
                .map_err(|e| AegisError::Audit(format!("Failed to serialize entry: {}", e)))?;
            writeln!(file, "{line}")
                .map_err(|e| AegisError::Audit(format!("Failed to write entry: {}", e)))?;
        } else {
            writeln!(
                file,
                "[{}] id={} status={} mode={} replacements={} time={}ms",
                entry.timestamp,
                entry.id,
                entry.status,
                entry.mode,
                entry.replacements,
                entry.processing_time_ms
            )
            .map_err(|e| AegisError::Audit(format!("Failed to write entry: {}", e)))?;
        }

        Ok(())
    }
}

/// SHA-256 hash of a value, rendered as lowercase hex
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::outcome::{ReplacedSpan, ServiceMode};
    use crate::domain::span::{DetectionMethod, Span};

    fn sample_result() -> AnonymizationResult {
        let span = Span::new(5, 16, Category::Ssn, 0.8, DetectionMethod::FallbackRegex);
        AnonymizationResult::new(
            "SSN: identifier".to_string(),
            vec![ReplacedSpan::from_span(&span, "123-45-6789", "identifier")],
            None,
            ServiceMode::Degraded,
            3,
        )
    }

    #[test]
    fn test_hash_is_stable_and_hex() {
        let hash = hash_value("123-45-6789");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_value("123-45-6789"));
        assert_ne!(hash, hash_value("123-45-6780"));
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let logger = AuditLogger::new(path.clone(), true, false).unwrap();
        logger.log_result(&sample_result()).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_entries_contain_hash_not_plaintext() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let logger = AuditLogger::new(path.clone(), true, true).unwrap();
        logger.log_result(&sample_result()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("123-45-6789"));
        assert!(contents.contains(&hash_value("123-45-6789")));
        assert!(contents.contains("SSN"));
    }

    #[test]
    fn test_plain_text_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let logger = AuditLogger::new(path.clone(), false, true).unwrap();
        logger.log_result(&sample_result()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("replacements=1"));
        assert!(!contents.contains("123-45-6789"));
    }
}
