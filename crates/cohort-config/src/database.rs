//! Storage location configuration.

use serde::{Deserialize, Serialize};

/// Sentinel path for a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    ".cohort/cohort.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the local libSQL database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_project_local_file() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, ".cohort/cohort.db");
        assert!(!config.is_in_memory());
    }
}
