//! Query session behavior settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Delay before the loading indicator hides after a request settles (0-10000 ms).
    pub loading_reset_delay_ms: u32,
    /// Maximum toasts kept at once (1-256).
    pub notification_capacity: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            loading_reset_delay_ms: 300,
            notification_capacity: 16,
        }
    }
}
