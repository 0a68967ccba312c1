use crate::TenantContext;

use intake_config::CorsConfig;

use std::collections::BTreeMap;

/// Well-known policy name that triggers tenant-scoped derivation.
/// Any other name bypasses tenant logic entirely.
pub const FRONTEND_POLICY_NAME: &str = "Frontend";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    pub origins: Vec<String>,
    pub allow_any_header: bool,
    pub allow_any_method: bool,
    pub allow_credentials: bool,
}

impl CorsPolicy {
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o.eq_ignore_ascii_case(origin))
    }
}

/// Per-request CORS policy source.
///
/// The "Frontend" policy is derived from the resolved tenant so that two
/// tenants sharing one process never see each other's allowed origins.
/// Every other name defers to config-defined named policies, which may
/// themselves be absent.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicyProvider {
    defaults: BTreeMap<String, CorsPolicy>,
}

impl CorsPolicyProvider {
    pub fn from_config(config: &CorsConfig) -> Self {
        let defaults = config
            .policies
            .iter()
            .map(|(name, policy)| {
                (
                    name.clone(),
                    CorsPolicy {
                        origins: policy.origins.clone(),
                        allow_any_header: true,
                        allow_any_method: true,
                        allow_credentials: policy.allow_credentials,
                    },
                )
            })
            .collect();

        Self { defaults }
    }

    /// Tenant-scoped lookup. Returns None to defer to the caller's default
    /// behavior (typically: no CORS headers at all).
    pub fn get_policy(&self, ctx: &TenantContext, name: &str) -> Option<CorsPolicy> {
        if name == FRONTEND_POLICY_NAME {
            if let Some(tenant) = ctx.current() {
                if !tenant.frontend_origins.is_empty() {
                    return Some(CorsPolicy {
                        origins: tenant.frontend_origins.clone(),
                        allow_any_header: true,
                        allow_any_method: true,
                        allow_credentials: true,
                    });
                }
            }
        }

        self.defaults.get(name).cloned()
    }
}
