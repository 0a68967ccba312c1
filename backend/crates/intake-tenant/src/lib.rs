pub mod cache;
pub mod context;
pub mod cors;
pub mod error;
pub mod record;
pub mod registry;
pub mod resolver;

pub use cache::{CacheStore, TenantScopedCache};
pub use context::TenantContext;
pub use cors::{CorsPolicy, CorsPolicyProvider, FRONTEND_POLICY_NAME};
pub use error::{Result, TenantError};
pub use record::TenantRecord;
pub use registry::TenantRegistry;
pub use resolver::{Resolution, TENANT_HEADER, TenantResolver};

#[cfg(test)]
mod tests;
