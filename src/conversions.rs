//! Wire code ↔ domain enum conversions.
//!
//! Both APIs carry their enums as integers on the wire. Implements TryFrom<i32>
//! for fallible decode (unknown codes are errors) and From<X> for i32 for encode.

use crate::legacy::JobUpdateStatus;
use crate::types::Error;
use crate::workflow::{WorkflowState, WorkflowType};

// =============================================================================
// Enum conversion macro — generates TryFrom<i32> and From<X> for i32
// from an explicit variant = code table. Must not name `Self::Error`:
// `JobUpdateStatus` has a variant of that name.
// =============================================================================

macro_rules! wire_enum_conv {
    ($domain:ident, $label:expr, [$( $variant:ident = $code:literal ),+ $(,)?]) => {
        impl TryFrom<i32> for $domain {
            type Error = Error;

            fn try_from(value: i32) -> Result<Self, Error> {
                match value {
                    $( $code => Ok($domain::$variant), )+
                    _ => Err(Error::validation(format!(concat!("Invalid ", $label, ": {}"), value))),
                }
            }
        }

        impl From<$domain> for i32 {
            fn from(val: $domain) -> i32 {
                match val {
                    $( $domain::$variant => $code, )+
                }
            }
        }
    };
}

wire_enum_conv!(WorkflowState, "WorkflowState", [
    Invalid = 0, Initialized = 1, RollingForward = 2, Paused = 3, Succeeded = 4,
    Aborted = 5, Failed = 6, RollingBackward = 7, RolledBack = 8,
]);

wire_enum_conv!(WorkflowType, "WorkflowType", [
    Invalid = 0, Update = 1, Restart = 2, Start = 3, Stop = 4,
]);

wire_enum_conv!(JobUpdateStatus, "JobUpdateStatus", [
    RollingForward = 0, RollingBack = 1, RollForwardPaused = 2, RollBackPaused = 3,
    RolledForward = 4, RolledBack = 5, Aborted = 6, Error = 7, Failed = 8,
    RollForwardAwaitingPulse = 9, RollBackAwaitingPulse = 10,
]);
