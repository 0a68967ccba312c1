use std::time::Duration;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use uuid::Uuid;

use intake_auth::{AccessType, ResourceType};

use crate::{
    ApiResult, AppState,
    api::extractors::{CurrentPrincipal, CurrentTenant},
};

const APPLICATION_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
pub struct ApplicationDto {
    pub id: String,
    pub tenant_id: Option<Uuid>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub application: ApplicationDto,
}

fn cache_key(application_id: &str) -> String {
    format!("application:{application_id}")
}

/// GET /api/v1/applications
///
/// Lists the application ids the caller holds a read grant for.
pub async fn list_applications(
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<Json<ApplicationListResponse>> {
    let applications = principal
        .permissions
        .iter()
        .filter(|claim| claim.matches_type_and_access(ResourceType::Application, AccessType::Read))
        .map(|claim| claim.resource_key.clone())
        .collect();

    Ok(Json(ApplicationListResponse { applications }))
}

/// GET /api/v1/applications/{application_id}
pub async fn get_application(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(application_id): Path<String>,
) -> ApiResult<Json<ApplicationResponse>> {
    let key = cache_key(&application_id);
    let status = match state.cache.get(&tenant, &key).await {
        Some(cached) => cached,
        None => {
            // Stand-in for the application repository.
            let status = "submitted".to_string();
            state
                .cache
                .set(&tenant, &key, status.clone(), Some(APPLICATION_CACHE_TTL))
                .await;
            status
        }
    };

    Ok(Json(ApplicationResponse {
        application: ApplicationDto {
            id: application_id,
            tenant_id: tenant.tenant_id(),
            status,
        },
    }))
}

/// PUT /api/v1/applications/{application_id}
pub async fn update_application(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(application_id): Path<String>,
) -> ApiResult<Json<ApplicationResponse>> {
    // Writes invalidate the cached copy so the next read refetches.
    state.cache.remove(&tenant, &cache_key(&application_id)).await;

    Ok(Json(ApplicationResponse {
        application: ApplicationDto {
            id: application_id,
            tenant_id: tenant.tenant_id(),
            status: "updated".to_string(),
        },
    }))
}
