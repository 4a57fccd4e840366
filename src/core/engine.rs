//! Anonymization engine
//!
//! The [`Engine`] wires the recognizer chain, span resolver, pseudonym
//! guard, and replacement engine into one pipeline and wraps every request
//! in the fail-safe layer: a request either produces a normal result, a
//! degraded-mode result, or an emergency-redacted result. The literal input
//! text is never part of an error path.
//!
//! # Operating modes
//!
//! The mode is computed once at construction and never changes:
//!
//! - `Normal` — the NER capability initialized; ML, pattern, and fallback
//!   recognizers all contribute.
//! - `Degraded` — the NER capability is disabled or failed to initialize;
//!   pattern and fallback recognizers carry detection alone.
//!
//! Emergency redaction is per-request and leaves the mode untouched.
//!
//! # Examples
//!
//! ```no_run
//! use aegis::config::AegisConfig;
//! use aegis::core::Engine;
//!
//! # async fn example() -> aegis::domain::Result<()> {
//! let engine = Engine::new(&AegisConfig::default()).await?;
//!
//! let result = engine
//!     .anonymize("SSN: 123-45-6789", None, "en")
//!     .await?;
//! assert_eq!(result.anonymized_text, "SSN: identifier");
//! # Ok(())
//! # }
//! ```

use crate::adapters::ner::{HttpNerProvider, NerProvider};
use crate::config::AegisConfig;
use crate::core::audit::AuditLogger;
use crate::core::health::HealthStatus;
use crate::core::recognizer::{
    FallbackRecognizer, MlRecognizer, PatternRecognizer, PatternRegistry, Recognizer,
    RecognizerChain,
};
use crate::core::replacement::{ReplacementEngine, ReplacementTable};
use crate::core::{pseudonym, resolver};
use crate::domain::errors::AegisError;
use crate::domain::outcome::{AnonymizationResult, ReplacedSpan, ServiceMode};
use crate::domain::result::Result;
use crate::domain::span::Span;
use std::sync::Arc;
use std::time::Instant;

/// Multi-layer detection and redaction engine
///
/// # Thread safety
///
/// All state is read-only after construction; the engine can be shared
/// across concurrent tasks behind an `Arc` without synchronization.
pub struct Engine {
    chain: RecognizerChain,
    replacement: ReplacementEngine,
    mode: ServiceMode,
    model_id: Option<String>,
    max_text_len: usize,
    languages: Vec<String>,
    audit: Option<AuditLogger>,
}

impl Engine {
    /// Build an engine from configuration
    ///
    /// Attempts NER initialization when `ner.enabled` is set; failure to
    /// initialize logs the error and permanently enters degraded mode for
    /// this engine — it is never treated as a request error.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration, pattern library, or
    /// replacement table is invalid, or the audit log cannot be created.
    pub async fn new(config: &AegisConfig) -> Result<Self> {
        Self::builder(config.clone()).build().await
    }

    /// Builder for custom assembly (alternate NER providers, extra
    /// recognizers)
    pub fn builder(config: AegisConfig) -> EngineBuilder {
        EngineBuilder {
            config,
            provider: None,
            extra_recognizers: Vec::new(),
        }
    }

    /// Detect sensitive spans without rewriting the text
    ///
    /// Returns the resolved (ordered, non-overlapping) span set. A
    /// resolution failure yields an empty list with an error log rather
    /// than a surfaced error, keeping the endpoint available; `anonymize`
    /// is the compliance surface.
    ///
    /// # Errors
    ///
    /// Returns [`AegisError::InvalidInput`] for oversized input or an
    /// unsupported language.
    pub async fn detect(&self, text: &str, language: &str) -> Result<Vec<Span>> {
        self.validate_input(text, language)?;

        let candidates = self.chain.detect(text, language).await;
        match resolver::resolve(candidates, text) {
            Ok(resolved) => Ok(resolved.into_vec()),
            Err(e) => {
                tracing::error!(error = %e, "Detection-only resolution failed");
                Ok(Vec::new())
            }
        }
    }

    /// Anonymize text, preserving an optional pseudonym
    ///
    /// Never returns original text on internal failure: any error past
    /// input validation collapses the request into an emergency-redacted
    /// result whose text is the fixed redaction marker.
    ///
    /// # Errors
    ///
    /// Returns [`AegisError::InvalidInput`] for oversized input or an
    /// unsupported language; nothing else.
    pub async fn anonymize(
        &self,
        text: &str,
        pseudonym: Option<&str>,
        language: &str,
    ) -> Result<AnonymizationResult> {
        self.validate_input(text, language)?;

        let start = Instant::now();
        let result = match self.anonymize_inner(text, pseudonym, language).await {
            Ok((anonymized_text, spans)) => AnonymizationResult::new(
                anonymized_text,
                spans,
                pseudonym.map(str::to_string),
                self.mode,
                start.elapsed().as_millis() as u64,
            ),
            Err(e) => {
                tracing::error!(error = %e, "Pipeline failure; emergency redaction applied");
                AnonymizationResult::emergency(
                    pseudonym.map(str::to_string),
                    self.mode,
                    start.elapsed().as_millis() as u64,
                )
            }
        };

        if let Some(ref audit) = self.audit {
            if let Err(e) = audit.log_result(&result) {
                tracing::warn!(error = %e, "Audit write failed");
            }
        }

        Ok(result)
    }

    /// Anonymize a batch concurrently
    ///
    /// Inputs that fail validation are skipped with an error log; every
    /// other input yields a result (normal or emergency-redacted).
    pub async fn anonymize_batch(
        &self,
        texts: &[String],
        pseudonym: Option<&str>,
        language: &str,
    ) -> Vec<AnonymizationResult> {
        let futures = texts
            .iter()
            .map(|text| self.anonymize(text, pseudonym, language));

        futures::future::join_all(futures)
            .await
            .into_iter()
            .filter_map(|outcome| match outcome {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::error!(error = %e, "Skipping invalid batch item");
                    None
                }
            })
            .collect()
    }

    /// Current health snapshot
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            mode: self.mode,
            ner_loaded: self.model_id.is_some(),
            model_id: self.model_id.clone(),
            recognizers: self
                .chain
                .names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Operating mode, fixed at construction
    pub fn mode(&self) -> ServiceMode {
        self.mode
    }

    /// The detection → resolution → guard → replacement pipeline; any error
    /// here is converted into emergency redaction by the caller
    async fn anonymize_inner(
        &self,
        text: &str,
        pseudonym: Option<&str>,
        language: &str,
    ) -> Result<(String, Vec<ReplacedSpan>)> {
        let candidates = self.chain.detect(text, language).await;
        tracing::debug!(candidates = candidates.len(), "Detection complete");

        let resolved = resolver::resolve(candidates, text)?;
        let guarded = pseudonym::filter(resolved, text, pseudonym);
        self.replacement.apply(text, &guarded)
    }

    fn validate_input(&self, text: &str, language: &str) -> Result<()> {
        if text.len() > self.max_text_len {
            return Err(AegisError::InvalidInput(format!(
                "text length {} exceeds maximum {}",
                text.len(),
                self.max_text_len
            )));
        }
        if !self.languages.iter().any(|l| l == language) {
            return Err(AegisError::InvalidInput(format!(
                "unsupported language '{}'",
                language
            )));
        }
        Ok(())
    }
}

/// Builder for [`Engine`]
pub struct EngineBuilder {
    config: AegisConfig,
    provider: Option<Arc<dyn NerProvider>>,
    extra_recognizers: Vec<Arc<dyn Recognizer>>,
}

impl EngineBuilder {
    /// Use a pre-built NER provider instead of connecting over HTTP
    ///
    /// The engine runs in normal mode with this provider regardless of
    /// `ner.enabled`.
    pub fn with_ner_provider(mut self, provider: Arc<dyn NerProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Insert an additional recognizer between the ML and pattern layers
    pub fn with_recognizer(mut self, recognizer: Arc<dyn Recognizer>) -> Self {
        self.extra_recognizers.push(recognizer);
        self
    }

    /// Assemble the engine
    pub async fn build(self) -> Result<Engine> {
        let config = self.config;
        config
            .validate()
            .map_err(AegisError::Configuration)?;

        let registry = match config.detection.pattern_library {
            Some(ref path) => PatternRegistry::from_file(path)?,
            None => PatternRegistry::embedded()?,
        };

        let table = match config.replacement.table_path {
            Some(ref path) => ReplacementTable::from_file(path)?,
            None => ReplacementTable::builtin(),
        };

        let (ml_provider, mode) = match self.provider {
            Some(provider) => (Some(provider), ServiceMode::Normal),
            None if config.ner.enabled => match HttpNerProvider::connect(&config.ner).await {
                Ok(provider) => (
                    Some(Arc::new(provider) as Arc<dyn NerProvider>),
                    ServiceMode::Normal,
                ),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "NER initialization failed; entering degraded mode for process lifetime"
                    );
                    (None, ServiceMode::Degraded)
                }
            },
            None => {
                tracing::info!("NER disabled; running in degraded mode");
                (None, ServiceMode::Degraded)
            }
        };

        let model_id = ml_provider.as_ref().map(|p| p.model_id().to_string());

        let mut recognizers: Vec<Arc<dyn Recognizer>> = Vec::new();
        if let Some(provider) = ml_provider {
            recognizers.push(Arc::new(MlRecognizer::new(
                provider,
                config.detection.score_threshold,
            )));
        }
        recognizers.extend(self.extra_recognizers);
        recognizers.push(Arc::new(PatternRecognizer::from_registry(
            &registry,
            &config.detection,
        )));
        recognizers.push(Arc::new(FallbackRecognizer::from_registry(&registry)));

        let audit = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
                true,
            )?)
        } else {
            None
        };

        tracing::info!(
            mode = mode.as_str(),
            recognizers = recognizers.len(),
            "Engine initialized"
        );

        Ok(Engine {
            chain: RecognizerChain::new(recognizers),
            replacement: ReplacementEngine::new(table),
            mode,
            model_id,
            max_text_len: config.application.max_text_len,
            languages: config.detection.languages.clone(),
            audit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::{PipelineStatus, REDACTION_MARKER};

    async fn engine() -> Engine {
        Engine::new(&AegisConfig::default()).await.unwrap()
    }

    #[tokio::test]
    async fn test_default_engine_runs_degraded() {
        let engine = engine().await;
        assert_eq!(engine.mode(), ServiceMode::Degraded);
        let health = engine.health();
        assert!(!health.ner_loaded);
        assert_eq!(health.recognizers, vec!["pattern", "fallback"]);
    }

    #[tokio::test]
    async fn test_anonymize_ssn_and_email() {
        let engine = engine().await;
        let result = engine
            .anonymize("SSN: 123-45-6789, Email: user@example.com", None, "en")
            .await
            .unwrap();
        assert_eq!(
            result.anonymized_text,
            "SSN: identifier, Email: email"
        );
        assert_eq!(result.status, PipelineStatus::Redacted);
    }

    #[tokio::test]
    async fn test_clean_text_unchanged() {
        let engine = engine().await;
        let result = engine
            .anonymize("nothing sensitive here", None, "en")
            .await
            .unwrap();
        assert_eq!(result.anonymized_text, "nothing sensitive here");
        assert_eq!(result.status, PipelineStatus::Clean);
    }

    #[tokio::test]
    async fn test_empty_text_is_clean() {
        let engine = engine().await;
        let result = engine.anonymize("", None, "en").await.unwrap();
        assert_eq!(result.anonymized_text, "");
        assert_eq!(result.status, PipelineStatus::Clean);
    }

    #[tokio::test]
    async fn test_unsupported_language_rejected() {
        let engine = engine().await;
        let result = engine.anonymize("text", None, "xx").await;
        assert!(matches!(result, Err(AegisError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_oversized_input_rejected() {
        let mut config = AegisConfig::default();
        config.application.max_text_len = 8;
        let engine = Engine::new(&config).await.unwrap();
        let result = engine.anonymize("far too long for this", None, "en").await;
        assert!(matches!(result, Err(AegisError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_injected_fault_triggers_emergency() {
        use crate::domain::category::Category;
        use crate::domain::span::DetectionMethod;
        use async_trait::async_trait;

        struct PoisonRecognizer;

        #[async_trait]
        impl Recognizer for PoisonRecognizer {
            fn name(&self) -> &'static str {
                "poison"
            }

            fn method(&self) -> DetectionMethod {
                DetectionMethod::CustomRecognizer
            }

            async fn detect(
                &self,
                _text: &str,
                _language: &str,
            ) -> Result<Vec<Span>> {
                // Offsets far past the end of any input
                Ok(vec![Span::new(
                    10_000,
                    10_005,
                    Category::Person,
                    0.99,
                    DetectionMethod::CustomRecognizer,
                )])
            }
        }

        let engine = Engine::builder(AegisConfig::default())
            .with_recognizer(Arc::new(PoisonRecognizer))
            .build()
            .await
            .unwrap();

        let text = "John Smith, SSN: 123-45-6789";
        let result = engine.anonymize(text, None, "en").await.unwrap();
        assert_eq!(result.status, PipelineStatus::EmergencyRedacted);
        assert_eq!(result.anonymized_text, REDACTION_MARKER);
        assert!(!result.anonymized_text.contains("123-45-6789"));
        assert!(result.spans.is_empty());
    }

    #[tokio::test]
    async fn test_batch_skips_invalid_items() {
        let engine = engine().await;
        let mut texts = vec!["SSN: 123-45-6789".to_string(), "clean".to_string()];
        let results = engine.anonymize_batch(&texts, None, "en").await;
        assert_eq!(results.len(), 2);

        texts.push("x".repeat(2_000_000));
        let results = engine.anonymize_batch(&texts, None, "en").await;
        assert_eq!(results.len(), 2);
    }
}
