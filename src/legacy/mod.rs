//! Legacy scheduling API types.
//!
//! The job update vocabulary external clients still speak. Owned by the legacy
//! API; this crate only produces values of it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a job update as the legacy API reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobUpdateStatus {
    RollingForward,
    RollingBack,
    RollForwardPaused,
    RollBackPaused,
    RolledForward,
    RolledBack,
    Aborted,
    Error,
    Failed,
    RollForwardAwaitingPulse,
    RollBackAwaitingPulse,
}

impl JobUpdateStatus {
    /// No further events follow a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobUpdateStatus::RolledForward
                | JobUpdateStatus::RolledBack
                | JobUpdateStatus::Aborted
                | JobUpdateStatus::Error
                | JobUpdateStatus::Failed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobUpdateStatus::RollingForward => "ROLLING_FORWARD",
            JobUpdateStatus::RollingBack => "ROLLING_BACK",
            JobUpdateStatus::RollForwardPaused => "ROLL_FORWARD_PAUSED",
            JobUpdateStatus::RollBackPaused => "ROLL_BACK_PAUSED",
            JobUpdateStatus::RolledForward => "ROLLED_FORWARD",
            JobUpdateStatus::RolledBack => "ROLLED_BACK",
            JobUpdateStatus::Aborted => "ABORTED",
            JobUpdateStatus::Error => "ERROR",
            JobUpdateStatus::Failed => "FAILED",
            JobUpdateStatus::RollForwardAwaitingPulse => "ROLL_FORWARD_AWAITING_PULSE",
            JobUpdateStatus::RollBackAwaitingPulse => "ROLL_BACK_AWAITING_PULSE",
        }
    }
}

impl fmt::Display for JobUpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job update event in the legacy API's shape.
///
/// Both fields are always set; there is no partially built event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdateEvent {
    pub status: JobUpdateStatus,

    /// Milliseconds since the Unix epoch, UTC.
    pub timestamp_ms: i64,
}
