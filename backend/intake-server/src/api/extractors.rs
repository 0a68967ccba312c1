//! Axum extractors for request-scoped tenant and principal values

use crate::ApiError;

use intake_auth::Principal;
use intake_tenant::TenantContext;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

/// Extracts the tenant context populated by the resolver middleware.
///
/// Bypassed requests carry an empty context; requests that never went
/// through the resolver (shouldn't happen on API routes) get one too.
pub struct CurrentTenant(pub TenantContext);

impl<S: Send + Sync> FromRequestParts<S> for CurrentTenant {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let ctx = parts
                .extensions
                .get::<TenantContext>()
                .cloned()
                .unwrap_or_default();

            Ok(CurrentTenant(ctx))
        }
    }
}

/// Extracts the authenticated principal inserted by the auth middleware.
pub struct CurrentPrincipal(pub Principal);

impl<S: Send + Sync> FromRequestParts<S> for CurrentPrincipal {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            parts
                .extensions
                .get::<Principal>()
                .cloned()
                .map(CurrentPrincipal)
                .ok_or_else(|| ApiError::Unauthorized {
                    detail: "no principal on request".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
        }
    }
}
