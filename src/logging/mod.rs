//! Logging and observability
//!
//! Structured logging with configurable levels and optional rolling JSON
//! file output. Sensitive text never reaches the log stream; detection
//! events carry offsets and categories only.
//!
//! # Example
//!
//! ```no_run
//! use aegis::logging::init_logging;
//! use aegis::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Pipeline started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
