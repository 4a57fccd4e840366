//! HTTP client for a remote NER analyzer service

use super::provider::{NerEntity, NerProvider};
use crate::config::NerConfig;
use crate::domain::errors::NerError;
use crate::domain::result::Result;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Request body for the analyzer's `/analyze` endpoint
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    language: &'a str,
}

/// HTTP-backed NER provider
///
/// Talks to an analyzer service exposing `GET /health` and
/// `POST /analyze` returning `[{"entity_type", "start", "end", "score"}]`.
pub struct HttpNerProvider {
    client: reqwest::Client,
    analyze_url: Url,
    health_url: Url,
    model_id: String,
    bearer_token: Option<String>,
}

impl HttpNerProvider {
    /// Connect to the analyzer service, probing its health endpoint
    ///
    /// Probes up to `config.startup_retries` times with exponential backoff
    /// before giving up. A failed connect is how the process enters
    /// degraded mode; it is not retried later.
    ///
    /// # Errors
    ///
    /// Returns [`NerError::Unavailable`] when the service does not answer
    /// the health probe within the configured attempts.
    pub async fn connect(config: &NerConfig) -> Result<Self> {
        let provider = Self::from_config(config)?;

        let mut last_error = String::new();
        for attempt in 1..=config.startup_retries.max(1) {
            match provider.probe_health().await {
                Ok(()) => {
                    tracing::info!(
                        model_id = %provider.model_id,
                        attempt,
                        "NER capability initialized"
                    );
                    return Ok(provider);
                }
                Err(e) => {
                    last_error = e;
                    tracing::warn!(
                        attempt,
                        max_attempts = config.startup_retries,
                        error = %last_error,
                        "NER health probe failed"
                    );
                    if attempt < config.startup_retries {
                        tokio::time::sleep(Duration::from_secs(1 << attempt.min(5))).await;
                    }
                }
            }
        }

        Err(NerError::Unavailable(last_error).into())
    }

    /// Build the provider without probing (used by `connect` and tests)
    fn from_config(config: &NerConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| NerError::Unavailable(format!("invalid base URL: {}", e)))?;
        let analyze_url = base_url
            .join("analyze")
            .map_err(|e| NerError::Unavailable(format!("invalid analyze URL: {}", e)))?;
        let health_url = base_url
            .join("health")
            .map_err(|e| NerError::Unavailable(format!("invalid health URL: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NerError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            analyze_url,
            health_url,
            model_id: config.model_id.clone(),
            bearer_token: config
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().as_ref().to_string()),
        })
    }

    async fn probe_health(&self) -> std::result::Result<(), String> {
        let mut request = self.client.get(self.health_url.clone());
        if let Some(ref token) = self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("health probe returned {}", response.status()))
        }
    }
}

#[async_trait]
impl NerProvider for HttpNerProvider {
    async fn analyze(&self, text: &str, language: &str) -> Result<Vec<NerEntity>> {
        let body = AnalyzeRequest { text, language };

        let mut request = self.client.post(self.analyze_url.clone()).json(&body);
        if let Some(ref token) = self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                NerError::Timeout("analyze request timed out".to_string())
            } else {
                NerError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NerError::RequestFailed(format!(
                "analyze returned HTTP {}",
                status
            ))
            .into());
        }

        let entities: Vec<NerEntity> = response
            .json()
            .await
            .map_err(|e| NerError::InvalidResponse(e.to_string()))?;

        tracing::debug!(count = entities.len(), "NER analyze completed");
        Ok(entities)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
