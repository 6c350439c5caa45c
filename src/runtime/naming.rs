//! Naming convention for auto-registered transitions.

use serde::{Deserialize, Serialize};

/// How condition names are composed from state names.
///
/// With the defaults, the condition guarding `Idle -> Running` is looked up
/// as `Condition_Idle_Running`.
///
/// Missing fields fall back to the defaults when deserialized, so a host
/// config only needs to name what it changes:
///
/// ```rust
/// use ticking_fsm::runtime::NamingConvention;
///
/// let naming: NamingConvention = serde_json::from_str(r#"{ "prefix": "can_" }"#).unwrap();
/// assert_eq!(naming.condition_name("Idle", "Running"), "can_Idle_Running");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConvention {
    pub prefix: String,
    pub connector: String,
}

impl NamingConvention {
    pub fn new(prefix: impl Into<String>, connector: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            connector: connector.into(),
        }
    }

    pub fn condition_name(&self, origin: &str, target: &str) -> String {
        format!("{}{}{}{}", self.prefix, origin, self.connector, target)
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new("Condition_", "_")
    }
}
