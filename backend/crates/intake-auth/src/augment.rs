use crate::{AccessType, PermissionClaim, Principal, ResourceType};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Permission store error: {message}")]
pub struct PermissionStoreError {
    pub message: String,
}

/// A stored grant for a caller identity.
#[derive(Debug, Clone)]
pub struct PermissionGrant {
    pub resource_type: ResourceType,
    pub resource_key: String,
    pub access_type: AccessType,
}

/// A stored template-specific grant.
#[derive(Debug, Clone)]
pub struct TemplateGrant {
    pub template_id: String,
    pub access_type: AccessType,
}

/// External permission store boundary.
///
/// Caching, if any, belongs behind this trait; the augmentor queries fresh
/// on every token validation.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    async fn grants_for(&self, identity: &str)
    -> Result<Vec<PermissionGrant>, PermissionStoreError>;

    async fn template_grants_for(
        &self,
        identity: &str,
    ) -> Result<Vec<TemplateGrant>, PermissionStoreError>;
}

/// Turns a validated identity into a capability set.
///
/// Two augmentation passes run concurrently: general grants for the caller
/// identity, and template-specific grants. A store failure or timeout never
/// fails the request; the principal just ends up with fewer (or zero)
/// permission claims and authorization denies downstream.
pub struct ClaimsAugmentor {
    store: Arc<dyn PermissionStore>,
    query_timeout: Duration,
}

impl ClaimsAugmentor {
    pub fn new(store: Arc<dyn PermissionStore>, query_timeout: Duration) -> Self {
        Self {
            store,
            query_timeout,
        }
    }

    /// Attach permission claims to the principal. Both passes complete
    /// before this returns; authorization never sees a partially
    /// populated claim set.
    pub async fn augment(&self, principal: &mut Principal) {
        let Some(identity) = principal.identity() else {
            debug!(
                "No identity claim for subject '{}'; skipping permission augmentation",
                principal.subject
            );
            return;
        };
        let identity = identity.to_string();

        let (grants, template_grants) = tokio::join!(
            self.query_grants(&identity),
            self.query_template_grants(&identity)
        );

        principal.permissions.extend(grants.into_iter().map(|g| {
            PermissionClaim::new(g.resource_type, g.resource_key, g.access_type)
        }));

        principal
            .permissions
            .extend(template_grants.into_iter().map(|g| {
                PermissionClaim::new(ResourceType::Template, g.template_id, g.access_type)
            }));

        debug!(
            "Augmented '{}' with {} permission claim(s)",
            identity,
            principal.permissions.len()
        );
    }

    async fn query_grants(&self, identity: &str) -> Vec<PermissionGrant> {
        match tokio::time::timeout(self.query_timeout, self.store.grants_for(identity)).await {
            Ok(Ok(grants)) => grants,
            Ok(Err(e)) => {
                warn!("Permission lookup failed for '{}': {}", identity, e);
                Vec::new()
            }
            Err(_) => {
                warn!("Permission lookup timed out for '{}'", identity);
                Vec::new()
            }
        }
    }

    async fn query_template_grants(&self, identity: &str) -> Vec<TemplateGrant> {
        match tokio::time::timeout(self.query_timeout, self.store.template_grants_for(identity))
            .await
        {
            Ok(Ok(grants)) => grants,
            Ok(Err(e)) => {
                warn!("Template permission lookup failed for '{}': {}", identity, e);
                Vec::new()
            }
            Err(_) => {
                warn!("Template permission lookup timed out for '{}'", identity);
                Vec::new()
            }
        }
    }
}
