//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of entries in the vote history view.
const fn default_history_limit() -> usize {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Maximum entries shown in a juror's vote history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(GeneralConfig::default().history_limit, 50);
    }
}
