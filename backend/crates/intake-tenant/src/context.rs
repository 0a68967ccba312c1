use crate::TenantRecord;

use std::sync::Arc;

use uuid::Uuid;

/// The tenant a single request belongs to.
///
/// Created empty when request processing begins, populated at most once by
/// the resolver, and dropped with the request. Carried as an explicit
/// request-scoped value (an axum request extension in the server), never a
/// process-wide singleton or thread-local: a shared holder would leak one
/// request's tenant into a concurrent one.
#[derive(Debug, Clone, Default)]
pub struct TenantContext {
    current: Option<Arc<TenantRecord>>,
}

impl TenantContext {
    /// Context for a request that bypassed resolution (or has not been
    /// resolved yet).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn resolved(tenant: Arc<TenantRecord>) -> Self {
        Self {
            current: Some(tenant),
        }
    }

    pub fn current(&self) -> Option<&Arc<TenantRecord>> {
        self.current.as_ref()
    }

    pub fn tenant_id(&self) -> Option<Uuid> {
        self.current.as_ref().map(|t| t.id)
    }

    pub fn is_resolved(&self) -> bool {
        self.current.is_some()
    }
}
