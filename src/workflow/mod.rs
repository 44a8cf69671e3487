//! Orchestrator-side workflow types.
//!
//! Canonical definitions for the workflow lifecycle events the orchestrator
//! emits for a stateless job update. These are inputs only; nothing in this
//! crate constructs them except decoders and tests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an orchestrator workflow.
///
/// Coarser than the legacy status vocabulary: rollback and pulse information
/// lives in the update's opaque data, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowState {
    #[serde(rename = "WORKFLOW_STATE_INVALID", alias = "INVALID")]
    Invalid,
    #[serde(rename = "WORKFLOW_STATE_INITIALIZED", alias = "INITIALIZED")]
    Initialized,
    #[serde(rename = "WORKFLOW_STATE_ROLLING_FORWARD", alias = "ROLLING_FORWARD")]
    RollingForward,
    #[serde(rename = "WORKFLOW_STATE_PAUSED", alias = "PAUSED")]
    Paused,
    #[serde(rename = "WORKFLOW_STATE_SUCCEEDED", alias = "SUCCEEDED")]
    Succeeded,
    #[serde(rename = "WORKFLOW_STATE_ABORTED", alias = "ABORTED")]
    Aborted,
    #[serde(rename = "WORKFLOW_STATE_FAILED", alias = "FAILED")]
    Failed,
    #[serde(rename = "WORKFLOW_STATE_ROLLING_BACKWARD", alias = "ROLLING_BACKWARD")]
    RollingBackward,
    #[serde(rename = "WORKFLOW_STATE_ROLLED_BACK", alias = "ROLLED_BACK")]
    RolledBack,
}

impl WorkflowState {
    pub const ALL: [WorkflowState; 9] = [
        WorkflowState::Invalid,
        WorkflowState::Initialized,
        WorkflowState::RollingForward,
        WorkflowState::Paused,
        WorkflowState::Succeeded,
        WorkflowState::Aborted,
        WorkflowState::Failed,
        WorkflowState::RollingBackward,
        WorkflowState::RolledBack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowState::Invalid => "WORKFLOW_STATE_INVALID",
            WorkflowState::Initialized => "WORKFLOW_STATE_INITIALIZED",
            WorkflowState::RollingForward => "WORKFLOW_STATE_ROLLING_FORWARD",
            WorkflowState::Paused => "WORKFLOW_STATE_PAUSED",
            WorkflowState::Succeeded => "WORKFLOW_STATE_SUCCEEDED",
            WorkflowState::Aborted => "WORKFLOW_STATE_ABORTED",
            WorkflowState::Failed => "WORKFLOW_STATE_FAILED",
            WorkflowState::RollingBackward => "WORKFLOW_STATE_ROLLING_BACKWARD",
            WorkflowState::RolledBack => "WORKFLOW_STATE_ROLLED_BACK",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of workflow the event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WorkflowType {
    #[default]
    #[serde(rename = "WORKFLOW_TYPE_INVALID", alias = "INVALID")]
    Invalid,
    #[serde(rename = "WORKFLOW_TYPE_UPDATE", alias = "UPDATE")]
    Update,
    #[serde(rename = "WORKFLOW_TYPE_RESTART", alias = "RESTART")]
    Restart,
    #[serde(rename = "WORKFLOW_TYPE_START", alias = "START")]
    Start,
    #[serde(rename = "WORKFLOW_TYPE_STOP", alias = "STOP")]
    Stop,
}

/// One lifecycle transition of an in-progress job update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEvent {
    /// Carried for diagnostics; translation ignores it.
    #[serde(rename = "type", default)]
    pub workflow_type: WorkflowType,

    pub state: WorkflowState,

    /// RFC 3339 date-time with an explicit offset.
    pub timestamp: String,
}

impl WorkflowEvent {
    pub fn new(state: WorkflowState, timestamp: impl Into<String>) -> Self {
        Self {
            workflow_type: WorkflowType::Update,
            state,
            timestamp: timestamp.into(),
        }
    }
}
