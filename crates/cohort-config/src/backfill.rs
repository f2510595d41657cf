//! Student document backfill tuning.

use serde::{Deserialize, Serialize};

const fn default_page_size() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackfillConfig {
    /// Number of student ids fetched per scan page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}
