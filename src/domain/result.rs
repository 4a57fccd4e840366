//! Result type alias used throughout the crate

use crate::domain::errors::AegisError;

/// Convenience alias; all fallible crate operations return this
pub type Result<T> = std::result::Result<T, AegisError>;
