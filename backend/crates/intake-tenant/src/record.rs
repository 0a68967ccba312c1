use intake_config::TenantConfig;

use serde::Serialize;
use uuid::Uuid;

/// One tenant as known to the running process.
///
/// Built once at startup from configuration and immutable afterwards;
/// tenant changes require a restart.
#[derive(Debug, Clone, Serialize)]
pub struct TenantRecord {
    pub id: Uuid,
    pub name: String,
    pub frontend_origins: Vec<String>,
    pub settings: serde_json::Value,
}

impl TenantRecord {
    /// Case-insensitive exact match against the configured frontend origins.
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.frontend_origins
            .iter()
            .any(|o| o.eq_ignore_ascii_case(origin))
    }
}

impl From<TenantConfig> for TenantRecord {
    fn from(config: TenantConfig) -> Self {
        Self {
            id: config.id,
            name: config.name,
            frontend_origins: config.frontend_origins,
            settings: config.settings,
        }
    }
}
