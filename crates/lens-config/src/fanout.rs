//! Retrieval fan-out limits.

use serde::{Deserialize, Serialize};

const fn default_max_in_flight() -> usize {
    8
}

const fn default_deadline_secs() -> u64 {
    90
}

const fn default_inter_task_delay_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FanoutConfig {
    /// Maximum concurrent query tasks (each task issues its provider calls
    /// one at a time, so this also bounds in-flight connections).
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Overall deadline for the whole fan-out.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,

    /// Courtesy delay before each task issues its first call.
    #[serde(default = "default_inter_task_delay_ms")]
    pub inter_task_delay_ms: u64,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
            deadline_secs: default_deadline_secs(),
            inter_task_delay_ms: default_inter_task_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = FanoutConfig::default();
        assert_eq!(config.max_in_flight, 8);
        assert_eq!(config.deadline_secs, 90);
        assert_eq!(config.inter_task_delay_ms, 100);
    }
}
