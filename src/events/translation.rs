//! Event translation — orchestrator workflow events → legacy job update events.
//!
//! Pure deterministic mapping. Sequencing:
//!   1. state + opaque context → legacy status   (fails with StatusMapping)
//!   2. timestamp text → instant                  (fails with TimestampParse)
//!   3. instant → whole epoch milliseconds, truncated
//!   4. assemble the event
//!
//! Nothing is logged here; un-forwardable events are the caller's call.

use crate::legacy::JobUpdateEvent;
use crate::opaque::OpaqueContext;
use crate::types::TranslateError;
use crate::workflow::WorkflowEvent;

use super::status::{DefaultStatusMapper, StatusMapper};
use super::timestamp::{unix_millis_truncated, Rfc3339Parser, TimestampParser};

/// Translates workflow events with injected collaborators.
///
/// Holds no mutable state; share one instance across threads freely.
#[derive(Debug, Clone, Default)]
pub struct EventTranslator<M = DefaultStatusMapper, P = Rfc3339Parser> {
    mapper: M,
    parser: P,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: StatusMapper, P: TimestampParser> EventTranslator<M, P> {
    pub fn with_collaborators(mapper: M, parser: P) -> Self {
        Self { mapper, parser }
    }

    /// Translate one workflow event.
    pub fn translate(
        &self,
        event: &WorkflowEvent,
        context: &OpaqueContext,
    ) -> Result<JobUpdateEvent, TranslateError> {
        let status = self
            .mapper
            .map(event.state, context)
            .map_err(|source| TranslateError::StatusMapping {
                state: event.state,
                source,
            })?;

        let instant =
            self.parser
                .parse(&event.timestamp)
                .map_err(|source| TranslateError::TimestampParse {
                    timestamp: event.timestamp.clone(),
                    source,
                })?;

        Ok(JobUpdateEvent {
            status,
            timestamp_ms: unix_millis_truncated(&instant),
        })
    }

    /// Translate one workflow event whose opaque data is still serialized.
    ///
    /// An undecodable blob fails as a status mapping error, so it still takes
    /// precedence over a bad timestamp.
    pub fn translate_with_opaque(
        &self,
        event: &WorkflowEvent,
        raw_opaque: &str,
    ) -> Result<JobUpdateEvent, TranslateError> {
        let context =
            OpaqueContext::decode(raw_opaque).map_err(|source| TranslateError::StatusMapping {
                state: event.state,
                source,
            })?;
        self.translate(event, &context)
    }
}

/// Translate with the standard mapping table and RFC 3339 parsing.
pub fn translate_workflow_event(
    event: &WorkflowEvent,
    context: &OpaqueContext,
) -> Result<JobUpdateEvent, TranslateError> {
    EventTranslator::new().translate(event, context)
}
