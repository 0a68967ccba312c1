use crate::TenantContext;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;

/// Key-value cache client boundary.
///
/// Concurrency and consistency are the implementation's concern; this
/// layer only transforms keys.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>);
    async fn remove(&self, key: &str);
    /// Extend the lifetime of an existing entry without reading it.
    async fn refresh(&self, key: &str);
}

/// Cache wrapper that scopes every key to the current tenant.
#[derive(Clone)]
pub struct TenantScopedCache {
    inner: Arc<dyn CacheStore>,
}

impl TenantScopedCache {
    pub fn new(inner: Arc<dyn CacheStore>) -> Self {
        Self { inner }
    }

    /// `"t:{tenant_id}:{key}"` when a tenant is resolved; the key unchanged
    /// otherwise. The unprefixed path risks cross-tenant collisions, so it
    /// is logged rather than silent.
    pub fn prefix(ctx: &TenantContext, key: &str) -> String {
        match ctx.current() {
            Some(tenant) => format!("t:{}:{}", tenant.id, key),
            None => {
                warn!("Cache key '{}' used without a resolved tenant", key);
                key.to_string()
            }
        }
    }

    pub async fn get(&self, ctx: &TenantContext, key: &str) -> Option<String> {
        self.inner.get(&Self::prefix(ctx, key)).await
    }

    pub async fn set(&self, ctx: &TenantContext, key: &str, value: String, ttl: Option<Duration>) {
        self.inner.set(&Self::prefix(ctx, key), value, ttl).await
    }

    pub async fn remove(&self, ctx: &TenantContext, key: &str) {
        self.inner.remove(&Self::prefix(ctx, key)).await
    }

    pub async fn refresh(&self, ctx: &TenantContext, key: &str) {
        self.inner.refresh(&Self::prefix(ctx, key)).await
    }
}
