//! Core pipeline
//!
//! Control flow for a request:
//!
//! ```text
//! text → recognizer chain → span resolver → pseudonym guard
//!      → replacement engine → (output text, audit spans)
//! ```
//!
//! The [`Engine`] wraps the whole flow in the fail-safe layer; see
//! [`engine`] for the mode and emergency-redaction semantics.

pub mod audit;
pub mod engine;
pub mod health;
pub mod pseudonym;
pub mod recognizer;
pub mod replacement;
pub mod resolver;

pub use engine::{Engine, EngineBuilder};
pub use health::HealthStatus;
pub use recognizer::{Recognizer, RecognizerChain};
pub use replacement::{ReplacementEngine, ReplacementTable};
