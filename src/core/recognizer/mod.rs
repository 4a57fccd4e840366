//! Detection layers
//!
//! A [`Recognizer`] is one detection strategy; the [`RecognizerChain`] runs
//! the configured recognizers in fixed priority order (ML model first,
//! context-aware patterns second, strict fallback last) and aggregates their
//! raw candidate spans. Recognizers may legitimately return overlapping or
//! duplicate spans for the same region; deduplication is the resolver's job.
//!
//! Each recognizer call is isolated: a failing recognizer is logged and its
//! contribution skipped. The chain itself never fails because one layer did.

pub mod fallback;
pub mod ml;
pub mod pattern;
pub mod registry;

use crate::domain::result::Result;
use crate::domain::span::{DetectionMethod, Span};
use async_trait::async_trait;
use std::sync::Arc;

pub use fallback::FallbackRecognizer;
pub use ml::MlRecognizer;
pub use pattern::PatternRecognizer;
pub use registry::{fallback_confidence, CompiledFallback, CompiledPattern, PatternRegistry};

/// Trait for detection strategy implementations
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Stable name, used in logs and the health surface
    fn name(&self) -> &'static str;

    /// Detection method this recognizer contributes spans as
    fn method(&self) -> DetectionMethod;

    /// Detect candidate spans in the text
    ///
    /// Returned offsets must be valid byte offsets on character boundaries
    /// of `text`. Candidates may overlap each other or other recognizers'
    /// output.
    async fn detect(&self, text: &str, language: &str) -> Result<Vec<Span>>;
}

/// Ordered chain of recognizers
///
/// Construction fixes the order; new recognizers are added by implementing
/// [`Recognizer`] and inserting into the list at build time.
pub struct RecognizerChain {
    recognizers: Vec<Arc<dyn Recognizer>>,
}

impl RecognizerChain {
    /// Build a chain; `recognizers` must already be in priority order
    pub fn new(recognizers: Vec<Arc<dyn Recognizer>>) -> Self {
        Self { recognizers }
    }

    /// Run every recognizer and aggregate raw candidates
    ///
    /// Never fails as a whole: a recognizer that returns an error is logged
    /// and contributes nothing for this request.
    pub async fn detect(&self, text: &str, language: &str) -> Vec<Span> {
        let mut candidates = Vec::new();

        for recognizer in &self.recognizers {
            match recognizer.detect(text, language).await {
                Ok(spans) => {
                    tracing::debug!(
                        recognizer = recognizer.name(),
                        count = spans.len(),
                        "Recognizer contributed candidates"
                    );
                    candidates.extend(spans);
                }
                Err(e) => {
                    tracing::warn!(
                        recognizer = recognizer.name(),
                        error = %e,
                        "Recognizer failed; skipping its contribution"
                    );
                }
            }
        }

        candidates
    }

    /// Recognizer names in chain order
    pub fn names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::errors::AegisError;

    struct FixedRecognizer {
        spans: Vec<Span>,
    }

    #[async_trait]
    impl Recognizer for FixedRecognizer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn method(&self) -> DetectionMethod {
            DetectionMethod::CustomRecognizer
        }

        async fn detect(&self, _text: &str, _language: &str) -> Result<Vec<Span>> {
            Ok(self.spans.clone())
        }
    }

    struct FailingRecognizer;

    #[async_trait]
    impl Recognizer for FailingRecognizer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn method(&self) -> DetectionMethod {
            DetectionMethod::MlModel
        }

        async fn detect(&self, _text: &str, _language: &str) -> Result<Vec<Span>> {
            Err(AegisError::Recognizer {
                name: "failing",
                message: "backend exploded".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_chain_survives_failing_recognizer() {
        let span = Span::new(
            0,
            3,
            Category::Person,
            0.9,
            DetectionMethod::CustomRecognizer,
        );
        let chain = RecognizerChain::new(vec![
            Arc::new(FailingRecognizer),
            Arc::new(FixedRecognizer { spans: vec![span] }),
        ]);

        let candidates = chain.detect("Bob is here", "en").await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].category, Category::Person);
    }

    #[tokio::test]
    async fn test_chain_aggregates_duplicates() {
        let span = Span::new(
            0,
            3,
            Category::Person,
            0.9,
            DetectionMethod::CustomRecognizer,
        );
        let chain = RecognizerChain::new(vec![
            Arc::new(FixedRecognizer {
                spans: vec![span],
            }),
            Arc::new(FixedRecognizer {
                spans: vec![span],
            }),
        ]);

        // Duplicates are preserved here; the resolver deduplicates
        let candidates = chain.detect("Bob is here", "en").await;
        assert_eq!(candidates.len(), 2);
    }
}
