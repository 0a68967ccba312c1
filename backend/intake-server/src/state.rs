use intake_auth::{ClaimsAugmentor, SchemeSelector, TokenValidator};
use intake_tenant::{CorsPolicyProvider, TenantRegistry, TenantResolver, TenantScopedCache};

use std::sync::Arc;

/// Shared, read-only application state.
///
/// Everything here is either immutable after startup (registry, validators)
/// or internally synchronized (cache, permission store). Nothing in this
/// struct is per-request; request-scoped values (tenant context, principal)
/// travel as request extensions.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TenantRegistry>,
    pub resolver: TenantResolver,
    pub cors: Arc<CorsPolicyProvider>,
    pub selector: Arc<SchemeSelector>,
    pub validator: Arc<TokenValidator>,
    pub augmentor: Arc<ClaimsAugmentor>,
    pub cache: TenantScopedCache,
}
