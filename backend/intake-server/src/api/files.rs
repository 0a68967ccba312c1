use axum::{Json, extract::Path};
use serde::Serialize;

use intake_auth::{AccessType, ResourceType};

use crate::{ApiResult, api::extractors::CurrentPrincipal};

#[derive(Debug, Serialize)]
pub struct FileDto {
    pub id: String,
    pub scan_status: String,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub application_id: String,
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub file: FileDto,
}

/// GET /api/v1/applications/{application_id}/files
pub async fn list_application_files(
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(application_id): Path<String>,
) -> ApiResult<Json<FileListResponse>> {
    let files = principal
        .permissions
        .iter()
        .filter(|claim| claim.matches_type_and_access(ResourceType::File, AccessType::Read))
        .map(|claim| claim.resource_key.clone())
        .collect();

    Ok(Json(FileListResponse {
        application_id,
        files,
    }))
}

/// GET /api/v1/files/{file_id}
pub async fn get_file(Path(file_id): Path<String>) -> ApiResult<Json<FileResponse>> {
    Ok(Json(FileResponse {
        file: FileDto {
            id: file_id,
            scan_status: "clean".to_string(),
        },
    }))
}
