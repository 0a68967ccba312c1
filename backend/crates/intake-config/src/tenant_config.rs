use serde::Deserialize;
use uuid::Uuid;

/// One tenant definition from `[[tenants]]` in config.toml.
///
/// Tenants are loaded once at startup; changing them requires a restart.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantConfig {
    pub id: Uuid,
    pub name: String,
    /// Origins the tenant's frontend is served from, used for
    /// Origin-based tenant resolution and tenant-scoped CORS.
    #[serde(default)]
    pub frontend_origins: Vec<String>,
    /// Free-form per-tenant settings block, opaque to this crate.
    #[serde(default = "default_settings")]
    pub settings: serde_json::Value,
}

fn default_settings() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
