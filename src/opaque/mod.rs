//! Opaque update data.
//!
//! The bridge stores legacy-only facts about an update (rollback, pulse state,
//! explicit failure) in an opaque blob the orchestrator carries around without
//! interpreting. This module decodes that blob into [`OpaqueContext`], the typed
//! flag set the status mapper tie-breaks on.
//!
//! Wire form (JSON, every field optional):
//! ```text
//! {
//!   "update_id": "a1b2",
//!   "update_metadata": [{"key": "owner", "value": "infra"}],
//!   "update_actions": ["start_pulsed", "pulse", "rollback", "mark_failed"]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{MappingError, UpdateId};

/// Action the bridge recorded against an update, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateAction {
    /// Update was started in pulsed mode and waits for the first pulse.
    StartPulsed,
    Pulse,
    Rollback,
    /// Update was aborted because it failed, not because a user asked.
    MarkFailed,
}

/// Key/value metadata the client attached when starting the update. Checked for
/// shape, not retained: nothing downstream of the mapper reads it.
#[derive(Debug, Deserialize)]
struct UpdateMetadata {
    #[serde(rename = "key")]
    _key: String,
    #[serde(rename = "value")]
    _value: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OpaqueData {
    #[serde(default)]
    update_id: Option<String>,
    #[serde(default, rename = "update_metadata")]
    _metadata: Vec<UpdateMetadata>,
    #[serde(default)]
    update_actions: Vec<UpdateAction>,
}

/// Versioning context that disambiguates workflow states.
///
/// Flags are consulted in a fixed order: `failed`, then `rollback`, then
/// `awaiting_pulse`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpaqueContext {
    pub update_id: Option<UpdateId>,

    /// The update rolls back to the previous configuration.
    pub rollback: bool,

    /// Explicit terminal-failure marker.
    pub failed: bool,

    /// Paused until a client pulse arrives.
    pub awaiting_pulse: bool,
}

impl OpaqueContext {
    /// Decode the serialized opaque data of an update.
    ///
    /// Blank input is the empty context: updates started outside the bridge
    /// carry no opaque data at all.
    pub fn decode(raw: &str) -> Result<Self, MappingError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let data: OpaqueData = serde_json::from_str(raw)
            .map_err(|e| MappingError::malformed(format!("undecodable opaque data: {}", e)))?;

        let update_id = data
            .update_id
            .map(UpdateId::from_string)
            .transpose()
            .map_err(MappingError::malformed)?;

        Ok(Self::from_actions(update_id, &data.update_actions))
    }

    /// Derive the flag set from an ordered action log.
    pub fn from_actions(update_id: Option<UpdateId>, actions: &[UpdateAction]) -> Self {
        let rollback = actions.contains(&UpdateAction::Rollback);
        let failed = actions.contains(&UpdateAction::MarkFailed);
        let awaiting_pulse = actions
            .iter()
            .rev()
            .find(|a| matches!(a, UpdateAction::StartPulsed | UpdateAction::Pulse))
            .is_some_and(|a| *a == UpdateAction::StartPulsed);

        Self {
            update_id,
            rollback,
            failed,
            awaiting_pulse,
        }
    }

    pub fn with_rollback(mut self) -> Self {
        self.rollback = true;
        self
    }

    pub fn with_failed(mut self) -> Self {
        self.failed = true;
        self
    }

    pub fn with_awaiting_pulse(mut self) -> Self {
        self.awaiting_pulse = true;
        self
    }
}
