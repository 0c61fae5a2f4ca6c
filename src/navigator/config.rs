//! Navigator settings.

use super::error::BuildError;
use serde::{Deserialize, Serialize};

/// Attempts per edge when nothing else is configured.
pub const DEFAULT_MAX_RETRY: usize = 2;

/// Tunables for a [`Navigator`](super::Navigator).
///
/// Missing fields fall back to their defaults when deserializing:
///
/// ```rust
/// use navtrie::navigator::{NavigatorConfig, DEFAULT_MAX_RETRY};
///
/// let config = NavigatorConfig::from_json_str("{}").unwrap();
/// assert_eq!(config.max_retry, DEFAULT_MAX_RETRY);
///
/// let config = NavigatorConfig::from_json_str(r#"{"max_retry": 5}"#).unwrap();
/// assert_eq!(config.max_retry, 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Attempts of the action/checker pair per edge before giving up.
    pub max_retry: usize,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            max_retry: DEFAULT_MAX_RETRY,
        }
    }
}

impl NavigatorConfig {
    /// Configuration with the given per-edge attempt budget.
    pub fn with_max_retry(max_retry: usize) -> Self {
        Self { max_retry }
    }

    /// Parse from JSON; omitted fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject settings the navigator cannot run with.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_retry == 0 {
            return Err(BuildError::ZeroRetry);
        }
        Ok(())
    }
}
