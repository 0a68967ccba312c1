mod api;

use crate::{AppState, InMemoryCache, build_router};

use intake_auth::{
    AccessType, ClaimsAugmentor, PermissionGrant, PermissionStore, PermissionStoreError,
    ResourceType, SchemeSelector, TemplateGrant, TokenValidator,
};
use intake_config::TenantConfig;
use intake_tenant::{CorsPolicyProvider, TenantRegistry, TenantResolver, TenantScopedCache};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tower::ServiceExt;
use uuid::Uuid;

pub(crate) const TENANT_A: &str = "11111111-1111-1111-1111-111111111111";
pub(crate) const TENANT_B: &str = "22222222-2222-2222-2222-222222222222";
pub(crate) const ORIGIN_A: &str = "https://app.acme.example";
pub(crate) const ORIGIN_B: &str = "https://app.globex.example";

pub(crate) const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
pub(crate) const ISSUER: &str = "intake";
pub(crate) const AUDIENCE: &str = "intake-api";
pub(crate) const EMAIL: &str = "user@acme.example";

/// Canned permission store: every identity sees the same grant set.
struct FakeStore {
    grants: Vec<PermissionGrant>,
    template_grants: Vec<TemplateGrant>,
}

#[async_trait]
impl PermissionStore for FakeStore {
    async fn grants_for(
        &self,
        _identity: &str,
    ) -> Result<Vec<PermissionGrant>, PermissionStoreError> {
        Ok(self.grants.clone())
    }

    async fn template_grants_for(
        &self,
        _identity: &str,
    ) -> Result<Vec<TemplateGrant>, PermissionStoreError> {
        Ok(self.template_grants.clone())
    }
}

fn tenant_config(id: &str, name: &str, origin: &str) -> TenantConfig {
    TenantConfig {
        id: Uuid::parse_str(id).unwrap(),
        name: name.to_string(),
        frontend_origins: vec![origin.to_string()],
        settings: serde_json::json!({}),
    }
}

fn two_tenant_registry() -> Arc<TenantRegistry> {
    Arc::new(
        TenantRegistry::from_config(vec![
            tenant_config(TENANT_A, "Acme", ORIGIN_A),
            tenant_config(TENANT_B, "Globex", ORIGIN_B),
        ])
        .unwrap(),
    )
}

pub(crate) fn grant(
    resource_type: ResourceType,
    resource_key: &str,
    access_type: AccessType,
) -> PermissionGrant {
    PermissionGrant {
        resource_type,
        resource_key: resource_key.to_string(),
        access_type,
    }
}

pub(crate) fn template_grant(template_id: &str, access_type: AccessType) -> TemplateGrant {
    TemplateGrant {
        template_id: template_id.to_string(),
        access_type,
    }
}

pub(crate) fn app_with(
    grants: Vec<PermissionGrant>,
    template_grants: Vec<TemplateGrant>,
) -> Router {
    let registry = two_tenant_registry();

    let state = AppState {
        registry: registry.clone(),
        resolver: TenantResolver::new(registry),
        cors: Arc::new(CorsPolicyProvider::default()),
        selector: Arc::new(SchemeSelector::new(ISSUER)),
        validator: Arc::new(TokenValidator::new(SECRET, ISSUER, AUDIENCE)),
        augmentor: Arc::new(ClaimsAugmentor::new(
            Arc::new(FakeStore {
                grants,
                template_grants,
            }),
            Duration::from_millis(250),
        )),
        cache: TenantScopedCache::new(Arc::new(InMemoryCache::new())),
    };

    build_router(state)
}

pub(crate) fn app_with_grants(grants: Vec<PermissionGrant>) -> Router {
    app_with(grants, Vec::new())
}

pub(crate) fn bearer_token() -> String {
    let claims = serde_json::json!({
        "sub": "user-123",
        "iss": ISSUER,
        "aud": AUDIENCE,
        "exp": chrono::Utc::now().timestamp() + 3600,
        "iat": chrono::Utc::now().timestamp(),
        "email": EMAIL,
    });

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

/// GET with tenant header and bearer token, the common case.
pub(crate) fn api_get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header("X-Tenant-ID", TENANT_A)
        .header("Authorization", format!("Bearer {}", bearer_token()))
        .body(Body::empty())
        .unwrap()
}

pub(crate) async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
