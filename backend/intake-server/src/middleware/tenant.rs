//! Tenant resolution middleware
//!
//! Runs on every route. Resolution failures are terminal: the response is
//! written here and no downstream handler runs.

use crate::AppState;

use intake_tenant::{Resolution, TenantContext};

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::warn;
use serde_json::json;

pub async fn resolve_tenant(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let resolution =
        state
            .resolver
            .resolve(request.method(), request.uri().path(), request.headers());

    let ctx = match resolution {
        Ok(Resolution::Resolved(tenant)) => TenantContext::resolved(tenant),
        Ok(Resolution::Bypassed) => TenantContext::empty(),
        Err(e) => {
            warn!(
                "Tenant resolution failed for {} {}: {}",
                request.method(),
                request.uri().path(),
                e
            );
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.public_message() })),
            )
                .into_response();
        }
    };

    request.extensions_mut().insert(ctx);
    next.run(request).await
}
