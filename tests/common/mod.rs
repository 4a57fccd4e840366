//! Shared test helpers
#![allow(dead_code)]

use aegis::adapters::ner::{NerEntity, NerProvider};
use aegis::domain::{AegisError, NerError, Result};
use async_trait::async_trait;

/// NER provider returning a fixed entity list
pub struct MockNerProvider {
    pub entities: Vec<NerEntity>,
    pub model: String,
}

impl MockNerProvider {
    pub fn new(entities: Vec<NerEntity>) -> Self {
        Self {
            entities,
            model: "mock_ner_model".to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl NerProvider for MockNerProvider {
    async fn analyze(&self, _text: &str, _language: &str) -> Result<Vec<NerEntity>> {
        Ok(self.entities.clone())
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// NER provider that fails every analyze call
pub struct FailingNerProvider;

#[async_trait]
impl NerProvider for FailingNerProvider {
    async fn analyze(&self, _text: &str, _language: &str) -> Result<Vec<NerEntity>> {
        Err(AegisError::Ner(NerError::RequestFailed(
            "connection reset by peer".to_string(),
        )))
    }

    fn model_id(&self) -> &str {
        "failing_model"
    }
}

/// Convenience constructor for expected NER entities
pub fn entity(start: usize, end: usize, label: &str, score: f32) -> NerEntity {
    NerEntity {
        start,
        end,
        label: label.to_string(),
        score,
    }
}
