//! Scoring session configuration.

use std::time::Duration;

use jury_core::enums::ContestantStatus;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Upper bound on a vote write, in seconds. Unset leaves timing to the
    /// backend client.
    #[serde(default)]
    pub submit_timeout_secs: Option<u64>,

    /// Lifecycle status of the contestants loaded into a session.
    #[serde(default)]
    pub contestant_status: ContestantStatus,
}

impl SessionConfig {
    #[must_use]
    pub fn submit_timeout(&self) -> Option<Duration> {
        self.submit_timeout_secs.map(Duration::from_secs)
    }

    /// Reject values that would make every submit fail.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero timeout or an `unknown`
    /// contestant status.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.submit_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "session.submit_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.contestant_status == ContestantStatus::Unknown {
            return Err(ConfigError::InvalidValue {
                field: "session.contestant_status".into(),
                reason: "not a recognised contestant status".into(),
            });
        }
        Ok(())
    }
}
