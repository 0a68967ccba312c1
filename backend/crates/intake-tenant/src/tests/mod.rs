
use crate::{TenantContext, TenantRegistry};

use intake_config::TenantConfig;

use std::sync::Arc;

use uuid::Uuid;

pub(crate) const TENANT_A: &str = "11111111-1111-1111-1111-111111111111";
pub(crate) const TENANT_B: &str = "22222222-2222-2222-2222-222222222222";

pub(crate) fn tenant_config(id: &str, name: &str, origins: &[&str]) -> TenantConfig {
    TenantConfig {
        id: Uuid::parse_str(id).unwrap(),
        name: name.to_string(),
        frontend_origins: origins.iter().map(|o| o.to_string()).collect(),
        settings: serde_json::json!({}),
    }
}

pub(crate) fn two_tenant_registry() -> Arc<TenantRegistry> {
    Arc::new(
        TenantRegistry::from_config(vec![
            tenant_config(TENANT_A, "Acme", &["https://app.acme.example"]),
            tenant_config(TENANT_B, "Globex", &["https://app.globex.example"]),
        ])
        .unwrap(),
    )
}

pub(crate) fn context_for(registry: &TenantRegistry, id: &str) -> TenantContext {
    TenantContext::resolved(registry.get(Uuid::parse_str(id).unwrap()).unwrap())
}
