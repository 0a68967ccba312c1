use axum::{Json, extract::Path};
use serde::Serialize;
use uuid::Uuid;

use intake_auth::{AccessType, ResourceType};

use crate::{
    ApiResult,
    api::extractors::{CurrentPrincipal, CurrentTenant},
};

#[derive(Debug, Serialize)]
pub struct TemplateDto {
    pub id: String,
    pub tenant_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub template: TemplateDto,
}

/// GET /api/v1/templates
pub async fn list_templates(
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<Json<TemplateListResponse>> {
    let templates = principal
        .permissions
        .iter()
        .filter(|claim| claim.matches_type_and_access(ResourceType::Template, AccessType::Read))
        .map(|claim| claim.resource_key.clone())
        .collect();

    Ok(Json(TemplateListResponse { templates }))
}

/// GET /api/v1/templates/{template_id}
pub async fn get_template(
    CurrentTenant(tenant): CurrentTenant,
    Path(template_id): Path<String>,
) -> ApiResult<Json<TemplateResponse>> {
    Ok(Json(TemplateResponse {
        template: TemplateDto {
            id: template_id,
            tenant_id: tenant.tenant_id(),
        },
    }))
}
