//! Workflow state → legacy job update status.
//!
//! The orchestrator tracks fewer states than the legacy API reports, so the
//! opaque context breaks ties. Precedence is fixed: the terminal-failure flag
//! first, then rollback, then awaiting-pulse.
//!
//! ```text
//!   INITIALIZED / ROLLING_FORWARD → ROLLING_FORWARD | ROLL_FORWARD_AWAITING_PULSE
//!                                   ROLLING_BACK    | ROLL_BACK_AWAITING_PULSE   (rollback)
//!   ROLLING_BACKWARD              → ROLLING_BACK    | ROLL_BACK_AWAITING_PULSE
//!   PAUSED                        → ROLL_FORWARD_PAUSED | ROLL_BACK_PAUSED       (rollback)
//!   SUCCEEDED                     → ROLLED_FORWARD  | ROLLED_BACK                (rollback)
//!   ROLLED_BACK                   → ROLLED_BACK
//!   ABORTED                       → ABORTED         | FAILED                     (failed)
//!   FAILED                        → FAILED
//!   INVALID                       → error
//! ```
//! The failed flag only changes the answer for ABORTED; every other state ignores it.

use crate::legacy::JobUpdateStatus;
use crate::opaque::OpaqueContext;
use crate::types::MappingError;
use crate::workflow::WorkflowState;

/// Maps an orchestrator state plus context to a legacy status.
///
/// Implementations must be total over [`WorkflowState`] and stateless or
/// internally synchronized; translators call them concurrently.
pub trait StatusMapper: Send + Sync {
    fn map(
        &self,
        state: WorkflowState,
        context: &OpaqueContext,
    ) -> Result<JobUpdateStatus, MappingError>;
}

/// The standard mapping table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStatusMapper;

impl StatusMapper for DefaultStatusMapper {
    fn map(
        &self,
        state: WorkflowState,
        context: &OpaqueContext,
    ) -> Result<JobUpdateStatus, MappingError> {
        map_workflow_state(state, context)
    }
}

/// Apply the standard mapping table.
pub fn map_workflow_state(
    state: WorkflowState,
    context: &OpaqueContext,
) -> Result<JobUpdateStatus, MappingError> {
    match state {
        WorkflowState::Invalid => Err(MappingError::UnrecognizedState(state)),

        WorkflowState::Initialized | WorkflowState::RollingForward => {
            Ok(match (context.rollback, context.awaiting_pulse) {
                (true, true) => JobUpdateStatus::RollBackAwaitingPulse,
                (true, false) => JobUpdateStatus::RollingBack,
                (false, true) => JobUpdateStatus::RollForwardAwaitingPulse,
                (false, false) => JobUpdateStatus::RollingForward,
            })
        }

        WorkflowState::RollingBackward => {
            if context.awaiting_pulse {
                Ok(JobUpdateStatus::RollBackAwaitingPulse)
            } else {
                Ok(JobUpdateStatus::RollingBack)
            }
        }

        // An explicit pause wins over waiting for a pulse.
        WorkflowState::Paused => {
            if context.rollback {
                Ok(JobUpdateStatus::RollBackPaused)
            } else {
                Ok(JobUpdateStatus::RollForwardPaused)
            }
        }

        WorkflowState::Succeeded => {
            if context.rollback {
                Ok(JobUpdateStatus::RolledBack)
            } else {
                Ok(JobUpdateStatus::RolledForward)
            }
        }

        WorkflowState::RolledBack => Ok(JobUpdateStatus::RolledBack),

        WorkflowState::Aborted => {
            if context.failed {
                Ok(JobUpdateStatus::Failed)
            } else {
                Ok(JobUpdateStatus::Aborted)
            }
        }

        WorkflowState::Failed => Ok(JobUpdateStatus::Failed),
    }
}
