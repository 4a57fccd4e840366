// Aegis - PII/PHI Detection and Redaction Engine
// Copyright (c) 2025 Aegis Contributors
// Licensed under the MIT License

//! # Aegis - PII/PHI Detection and Redaction
//!
//! Aegis detects and redacts personally identifiable and protected-health
//! information in free text, replacing each detected span with a generic
//! token while preserving sentence structure and any caller-designated
//! pseudonym. It is built for consumers that must never retain or return
//! verbatim sensitive text: failure anywhere inside the pipeline collapses
//! into full-text redaction, never into leaked input.
//!
//! ## Architecture
//!
//! Aegis follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The pipeline (recognizer chain, resolver, pseudonym guard,
//!   replacement engine, fail-safe wrapper, audit, health)
//! - [`adapters`] - External integrations (the remote NER capability)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Detection layers
//!
//! Three recognizers contribute candidate spans in fixed priority order:
//!
//! 1. **ML model** — delegates to an external NER service
//! 2. **Pattern recognizer** — regexes with proximity-keyword confidence
//!    boosting (window and boost are explicit configuration)
//! 3. **Fallback regex** — strict patterns guaranteeing detection even in
//!    a fully degraded process
//!
//! Overlapping candidates are merged by a deterministic greedy resolver
//! (score, then method priority, then span length), and every surviving
//! span is replaced by its category's generic token.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aegis::config::AegisConfig;
//! use aegis::core::Engine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = Engine::new(&AegisConfig::default()).await?;
//!
//!     let result = engine
//!         .anonymize(
//!             "Patient: John Smith, SSN: 123-45-6789",
//!             None,
//!             "en",
//!         )
//!         .await?;
//!
//!     println!("{}", result.anonymized_text);
//!     println!("{} replacements", result.total_replacements());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`]. Errors inside the
//! detection/resolution/replacement boundary are absorbed (a degraded
//! layer) or converted to emergency redaction; the only error the pipeline
//! entry points surface is input validation:
//!
//! ```rust,no_run
//! use aegis::domain::AegisError;
//!
//! # async fn example(engine: aegis::core::Engine) {
//! match engine.anonymize("text", None, "xx").await {
//!     Err(AegisError::InvalidInput(reason)) => eprintln!("rejected: {reason}"),
//!     Ok(result) => println!("{}", result.anonymized_text),
//!     Err(other) => eprintln!("unexpected: {other}"),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! Aegis uses structured logging with the `tracing` crate. Log output
//! carries offsets, categories, and counts — never matched text:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(count = 3, "Detection complete");
//! warn!(recognizer = "ml_model", "Recognizer failed; skipping its contribution");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

pub use crate::config::AegisConfig;
pub use crate::core::{Engine, HealthStatus};
pub use crate::domain::{
    AnonymizationResult, Category, PipelineStatus, ServiceMode, Span,
};
