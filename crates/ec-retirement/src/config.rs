//! Configuration for the retirement engine

use serde::{Deserialize, Serialize};

/// Retirement service configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetirementConfig {
    /// Hard cap on live records; registration fails beyond it (anti-leak)
    pub max_pending: usize,
    /// Log a warning once a single lane's backlog reaches this depth
    pub lane_backlog_warn: usize,
}

impl Default for RetirementConfig {
    fn default() -> Self {
        Self {
            max_pending: 1_000_000,
            lane_backlog_warn: 10_000,
        }
    }
}
