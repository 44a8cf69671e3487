//! # ptoa-events - Workflow Event Translation
//!
//! Converts job update lifecycle events emitted by the orchestrator into the
//! job update events of the legacy scheduling API:
//! - Workflow state → legacy status, tie-broken by the update's opaque data
//! - RFC 3339 timestamps → epoch milliseconds (truncating)
//! - Wire codes for both enum vocabularies
//! - Batch/stream forwarding with a skip-or-abort error policy
//!
//! ## Architecture
//!
//! ```text
//!                     ┌────────────────────────────────┐
//!   WorkflowEvent  →  │        EventTranslator         │  →  JobUpdateEvent
//!   OpaqueContext  →  │  ┌────────────┐ ┌───────────┐  │
//!                     │  │StatusMapper│ │ Timestamp │  │
//!                     │  │            │ │  Parser   │  │
//!                     │  └────────────┘ └───────────┘  │
//!                     └────────────────────────────────┘
//! ```
//! The translator is stateless and performs no I/O; everything it needs comes
//! in through its arguments.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod conversions;
pub mod events;
pub mod legacy;
pub mod opaque;
pub mod types;
pub mod workflow;

// Internal utilities
pub mod observability;

pub use events::{translate_workflow_event, EventTranslator};
pub use legacy::{JobUpdateEvent, JobUpdateStatus};
pub use opaque::OpaqueContext;
pub use types::{Config, Error, Result, TranslateError};
pub use workflow::{WorkflowEvent, WorkflowState};
