//! NER provider trait definition

use crate::domain::result::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One entity returned by the NER capability
///
/// Offsets are byte offsets into the analyzed text. The label is the
/// backend's own tag set; mapping into the crate taxonomy happens in the
/// ML recognizer, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NerEntity {
    /// Byte offset of the first matched byte
    pub start: usize,
    /// Byte offset one past the last matched byte
    pub end: usize,
    /// Backend entity label (e.g. `PERSON`, `GPE`, `US_SSN`)
    #[serde(alias = "entity_type")]
    pub label: String,
    /// Confidence score in `[0.0, 1.0]`
    pub score: f32,
}

/// Trait for NER capability implementations
///
/// Implementations must be safe to share across concurrent requests; the
/// engine holds one behind an `Arc` for the process lifetime.
#[async_trait]
pub trait NerProvider: Send + Sync {
    /// Analyze text and return labeled entity spans
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::NerError`] wrapped in [`crate::domain::AegisError`]
    /// when the backend cannot be reached, times out, or answers with a
    /// payload that cannot be interpreted.
    async fn analyze(&self, text: &str, language: &str) -> Result<Vec<NerEntity>>;

    /// Identifier of the active model, reported via the health surface
    fn model_id(&self) -> &str;
}
