use axum::Json;
use serde::Serialize;

use intake_auth::{AccessType, ResourceType};

use crate::{ApiResult, api::extractors::CurrentPrincipal};

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub identity: Option<String>,
    pub channels: Vec<String>,
}

/// GET /api/v1/notifications
///
/// The channels a caller may read are carried in their grants, so the
/// listing is derived straight from the claim set.
pub async fn list_notifications(
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<Json<NotificationListResponse>> {
    let channels = principal
        .permissions
        .iter()
        .filter(|claim| {
            claim.matches_type_and_access(ResourceType::Notifications, AccessType::Read)
        })
        .map(|claim| claim.resource_key.clone())
        .collect();

    Ok(Json(NotificationListResponse {
        identity: principal.identity().map(str::to_string),
        channels,
    }))
}
