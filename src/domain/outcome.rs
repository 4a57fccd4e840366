//! Pipeline outcome types
//!
//! [`AnonymizationResult`] is the per-request product of the pipeline. It is
//! created per request, returned to the caller, and never persisted; the
//! audit log stores only hashed values derived from it.

use crate::domain::category::Category;
use crate::domain::span::{DetectionMethod, Span};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Marker used when a request falls into emergency redaction
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Operating mode of the detection stack, computed once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceMode {
    /// ML, pattern, and fallback recognizers operative
    Normal,
    /// NER capability unavailable; pattern and fallback recognizers only
    Degraded,
}

impl ServiceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Degraded => "degraded",
        }
    }
}

/// How a single request concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// No sensitive spans found; text returned unchanged
    Clean,
    /// Detected spans were replaced with generic tokens
    Redacted,
    /// An internal failure occurred; the entire input was replaced by the
    /// redaction marker and no original text was returned
    EmergencyRedacted,
}

/// One applied substitution, in pre-replacement coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacedSpan {
    /// Byte offset in the original (pre-replacement) text
    pub start: usize,
    /// Byte offset one past the span in the original text
    pub end: usize,
    /// Entity category
    pub category: Category,
    /// Detection layer that produced the span
    pub method: DetectionMethod,
    /// Confidence score of the winning span
    pub score: f32,
    /// Original text covered by the span
    pub original: String,
    /// Token written in its place
    pub replacement: String,
}

impl ReplacedSpan {
    /// Build from a resolved span plus the applied replacement
    pub fn from_span(span: &Span, original: &str, replacement: &str) -> Self {
        Self {
            start: span.start,
            end: span.end,
            category: span.category,
            method: span.method,
            score: span.score,
            original: original.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Result of one anonymization request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// Rewritten text with all detected spans replaced
    pub anonymized_text: String,
    /// Applied substitutions, ordered by original start offset
    pub spans: Vec<ReplacedSpan>,
    /// Pseudonym the caller asked to preserve, echoed back
    pub pseudonym_preserved: Option<String>,
    /// How this request concluded
    pub status: PipelineStatus,
    /// Operating mode the request ran under
    pub mode: ServiceMode,
    /// Wall-clock processing time
    pub processing_time_ms: u64,
    /// When the result was produced
    pub timestamp: DateTime<Utc>,
}

impl AnonymizationResult {
    /// Build a normal (non-emergency) result
    pub fn new(
        anonymized_text: String,
        spans: Vec<ReplacedSpan>,
        pseudonym: Option<String>,
        mode: ServiceMode,
        processing_time_ms: u64,
    ) -> Self {
        let status = if spans.is_empty() {
            PipelineStatus::Clean
        } else {
            PipelineStatus::Redacted
        };
        Self {
            anonymized_text,
            spans,
            pseudonym_preserved: pseudonym,
            status,
            mode,
            processing_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// Build the emergency result: the whole input is replaced by the
    /// redaction marker and no span detail is reported
    pub fn emergency(pseudonym: Option<String>, mode: ServiceMode, processing_time_ms: u64) -> Self {
        Self {
            anonymized_text: REDACTION_MARKER.to_string(),
            spans: Vec::new(),
            pseudonym_preserved: pseudonym,
            status: PipelineStatus::EmergencyRedacted,
            mode,
            processing_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// Number of substitutions applied
    pub fn total_replacements(&self) -> usize {
        self.spans.len()
    }

    /// Substitution counts grouped by category
    pub fn counts_by_category(&self) -> HashMap<Category, usize> {
        let mut counts = HashMap::new();
        for span in &self.spans {
            *counts.entry(span.category).or_insert(0) += 1;
        }
        counts
    }
}
