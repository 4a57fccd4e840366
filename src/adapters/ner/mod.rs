//! NER capability adapter
//!
//! The statistical NER model is an external collaborator: given text, it
//! returns labeled spans with confidence scores. This module defines the
//! [`NerProvider`] trait the pipeline consumes and an HTTP client
//! implementation for a remote analyzer service.
//!
//! The capability may be unavailable at process start (the engine then runs
//! degraded for the process lifetime) or fail per call (that call's
//! contribution is dropped, not the request).

pub mod http;
pub mod provider;

pub use http::HttpNerProvider;
pub use provider::{NerEntity, NerProvider};
