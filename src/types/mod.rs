//! Core types shared across the crate.
//!
//! - **IDs**: Strongly-typed identifiers (UpdateId)
//! - **Errors**: Translation and application error types with thiserror derives
//! - **Config**: Configuration structures for observability and forwarding

mod config;
mod errors;
mod ids;

pub use config::{Config, ErrorPolicy, ForwardingConfig, ObservabilityConfig};
pub use errors::{Error, MappingError, Result, TimestampError, TranslateError};
pub use ids::UpdateId;
