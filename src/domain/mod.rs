//! Domain models and types
//!
//! The domain layer holds the data model of the pipeline:
//!
//! - **Categories** ([`Category`], [`ComplianceClass`]) — the closed entity
//!   taxonomy with per-category replacement tokens and compliance groupings
//! - **Spans** ([`Span`], [`ResolvedSpans`], [`DetectionMethod`]) — labeled
//!   character ranges and the non-overlapping resolved set
//! - **Outcomes** ([`AnonymizationResult`], [`PipelineStatus`],
//!   [`ServiceMode`]) — per-request results and the process operating mode
//! - **Errors** ([`AegisError`], [`NerError`]) and the crate-wide
//!   [`Result`] alias
//!
//! All types are plain data; behavior lives in `core`.

pub mod category;
pub mod errors;
pub mod outcome;
pub mod result;
pub mod span;

pub use category::{Category, ComplianceClass};
pub use errors::{AegisError, NerError};
pub use outcome::{
    AnonymizationResult, PipelineStatus, ReplacedSpan, ServiceMode, REDACTION_MARKER,
};
pub use result::Result;
pub use span::{DetectionMethod, ResolvedSpans, Span};
