//! Event infrastructure — workflow event translation to the legacy API.
//!
//! The translator sequences two collaborators, a [`StatusMapper`] and a
//! [`TimestampParser`]; the forwarder applies it to batches and streams.

pub mod forward;
pub mod status;
pub mod timestamp;
pub mod translation;

pub use forward::{EventForwarder, ForwardReport, UpdateEventRecord};
pub use status::{map_workflow_state, DefaultStatusMapper, StatusMapper};
pub use timestamp::{unix_millis_truncated, Rfc3339Parser, TimestampParser};
pub use translation::{translate_workflow_event, EventTranslator};
