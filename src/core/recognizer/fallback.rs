//! Strict fallback recognizer
//!
//! Pure regex detection with no keyword context, guaranteeing some coverage
//! even when the ML and pattern layers contribute nothing. Confidence comes
//! from the per-category criticality tier rather than context.

use super::registry::{fallback_confidence, CompiledFallback, PatternRegistry};
use super::Recognizer;
use crate::domain::category::Category;
use crate::domain::result::Result;
use crate::domain::span::{DetectionMethod, Span};
use async_trait::async_trait;

use super::pattern::AGE_PROMOTION_THRESHOLD;

/// Strict regex fallback recognizer
pub struct FallbackRecognizer {
    rules: Vec<CompiledFallback>,
}

impl FallbackRecognizer {
    /// Build from a compiled registry
    pub fn from_registry(registry: &PatternRegistry) -> Self {
        Self {
            rules: registry.fallbacks().to_vec(),
        }
    }

    /// Number of loaded rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn detect_sync(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();

        for rule in &self.rules {
            for caps_result in rule.regex.captures_iter(text) {
                let caps = match caps_result {
                    Ok(caps) => caps,
                    Err(e) => {
                        // Backtracking limits on adversarial input abort
                        // this rule only, never the layer
                        tracing::debug!(rule = %rule.name, error = %e, "Fallback rule aborted");
                        break;
                    }
                };
                let matched = match caps.get(0) {
                    Some(m) => m,
                    None => continue,
                };
                if matched.start() == matched.end() {
                    continue;
                }

                let mut category = rule.category;
                let mut score = rule.score;

                if rule.category == Category::Age {
                    if let Some(age) = caps.get(1).and_then(|g| g.as_str().parse::<u32>().ok()) {
                        if age > AGE_PROMOTION_THRESHOLD {
                            category = Category::AgeOver89;
                            score = score.max(fallback_confidence(category));
                        }
                    }
                }

                spans.push(Span::new(
                    matched.start(),
                    matched.end(),
                    category,
                    score,
                    DetectionMethod::FallbackRegex,
                ));
            }
        }

        spans
    }
}

#[async_trait]
impl Recognizer for FallbackRecognizer {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn method(&self) -> DetectionMethod {
        DetectionMethod::FallbackRegex
    }

    async fn detect(&self, text: &str, _language: &str) -> Result<Vec<Span>> {
        Ok(self.detect_sync(text))
    }
}
