use axum::{Json, extract::Path};
use serde::Serialize;

use crate::{ApiResult, api::extractors::CurrentPrincipal};

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserDto,
}

/// GET /api/v1/users/{user_id}
pub async fn get_user(
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    // Only echo the email back when the caller is looking at their own record.
    let email = principal
        .email
        .as_deref()
        .filter(|email| email.eq_ignore_ascii_case(&user_id))
        .map(str::to_string);

    Ok(Json(UserResponse {
        user: UserDto { id: user_id, email },
    }))
}
