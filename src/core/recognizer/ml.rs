//! ML-model recognizer
//!
//! Delegates to the external NER capability and maps its label set into the
//! crate taxonomy. Per-call failures propagate to the chain, which logs and
//! skips this layer's contribution for the request.

use super::Recognizer;
use crate::adapters::ner::NerProvider;
use crate::domain::category::Category;
use crate::domain::result::Result;
use crate::domain::span::{DetectionMethod, Span};
use async_trait::async_trait;
use std::sync::Arc;

/// Recognizer backed by the NER capability
pub struct MlRecognizer {
    provider: Arc<dyn NerProvider>,
    score_threshold: f32,
}

impl MlRecognizer {
    /// Create an ML recognizer with the given confidence threshold
    pub fn new(provider: Arc<dyn NerProvider>, score_threshold: f32) -> Self {
        Self {
            provider,
            score_threshold: score_threshold.clamp(0.0, 1.0),
        }
    }

    /// Identifier of the active model
    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }
}

#[async_trait]
impl Recognizer for MlRecognizer {
    fn name(&self) -> &'static str {
        "ml_model"
    }

    fn method(&self) -> DetectionMethod {
        DetectionMethod::MlModel
    }

    async fn detect(&self, text: &str, language: &str) -> Result<Vec<Span>> {
        let entities = self.provider.analyze(text, language).await?;

        let mut spans = Vec::with_capacity(entities.len());
        for entity in entities {
            if entity.score < self.score_threshold {
                continue;
            }

            // The backend's offsets are untrusted; anything not on a valid
            // character boundary is dropped rather than allowed to poison
            // replacement downstream.
            let candidate = Span::new(
                entity.start,
                entity.end,
                Category::from_label(&entity.label).unwrap_or(Category::Other),
                entity.score,
                DetectionMethod::MlModel,
            );
            if !candidate.is_valid_for(text) {
                tracing::warn!(
                    start = entity.start,
                    end = entity.end,
                    label = %entity.label,
                    "Dropping NER span with invalid offsets"
                );
                continue;
            }

            spans.push(candidate);
        }

        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ner::NerEntity;

    struct StaticProvider {
        entities: Vec<NerEntity>,
    }

    #[async_trait]
    impl NerProvider for StaticProvider {
        async fn analyze(&self, _text: &str, _language: &str) -> Result<Vec<NerEntity>> {
            Ok(self.entities.clone())
        }

        fn model_id(&self) -> &str {
            "test_model"
        }
    }

    fn entity(start: usize, end: usize, label: &str, score: f32) -> NerEntity {
        NerEntity {
            start,
            end,
            label: label.to_string(),
            score,
        }
    }

    #[tokio::test]
    async fn test_threshold_filters_low_scores() {
        let provider = StaticProvider {
            entities: vec![
                entity(0, 4, "PERSON", 0.95),
                entity(5, 9, "PERSON", 0.4),
            ],
        };
        let recognizer = MlRecognizer::new(Arc::new(provider), 0.7);

        let spans = recognizer.detect("John Paul", "en").await.unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 0);
    }

    #[tokio::test]
    async fn test_unknown_label_maps_to_other() {
        let provider = StaticProvider {
            entities: vec![entity(0, 4, "WEIRD_TAG", 0.9)],
        };
        let recognizer = MlRecognizer::new(Arc::new(provider), 0.7);

        let spans = recognizer.detect("data", "en").await.unwrap();
        assert_eq!(spans[0].category, Category::Other);
    }

    #[tokio::test]
    async fn test_invalid_offsets_dropped() {
        let provider = StaticProvider {
            entities: vec![entity(2, 50, "PERSON", 0.9)],
        };
        let recognizer = MlRecognizer::new(Arc::new(provider), 0.7);

        let spans = recognizer.detect("short", "en").await.unwrap();
        assert!(spans.is_empty());
    }
}
