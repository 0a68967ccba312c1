use crate::{ConfigError, ConfigErrorResult, DEFAULT_PERMISSIONS_DB, DEFAULT_QUERY_TIMEOUT_MS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Permission store database file, relative to the config dir
    pub database_path: String,
    /// Budget for one permission store query; on timeout the request
    /// continues with an empty claim set
    pub query_timeout_ms: u64,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            database_path: String::from(DEFAULT_PERMISSIONS_DB),
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
        }
    }
}

impl PermissionsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.query_timeout_ms == 0 {
            return Err(ConfigError::config(
                "permissions.query_timeout_ms must be > 0",
            ));
        }

        if self.database_path.contains("..") || std::path::Path::new(&self.database_path).is_absolute() {
            return Err(ConfigError::config(
                "permissions.database_path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
