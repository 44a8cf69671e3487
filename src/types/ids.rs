//! Strongly-typed identifiers.
//!
//! All IDs are validated at construction time and implement common traits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed ID newtype wrapper.
///
/// Generates: struct, `from_string()`, `as_str()`, Display, Serialize, Deserialize.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn from_string(s: String) -> Result<Self, &'static str> {
                if s.is_empty() {
                    return Err(concat!(stringify!($name), " cannot be empty"));
                }
                Ok(Self(s))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// Update id assigned by the bridge when the legacy client started the update.
define_id!(UpdateId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_id_rejects_empty() {
        assert_eq!(
            UpdateId::from_string(String::new()),
            Err("UpdateId cannot be empty")
        );
        let id = UpdateId::from_string("upd-1".to_string()).unwrap();
        assert_eq!(id.as_str(), "upd-1");
        assert_eq!(id.to_string(), "upd-1");
    }
}
