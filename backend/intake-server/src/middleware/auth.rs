//! Bearer token authentication middleware for API routes
//!
//! Scheme selection runs first (unverified issuer peek), then the chosen
//! pipeline validates the token, then the claims augmentor attaches the
//! caller's permission set. Authorization handlers never query the
//! permission store themselves.

use crate::{ApiError, AppState};

use intake_auth::{AuthError, Principal, Result as AuthResult};

use std::panic::Location;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use log::debug;

pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = match build_principal(&state, request.headers()).await {
        Ok(principal) => principal,
        Err(e) => {
            debug!("Authentication failed: {}", e);
            return ApiError::from(e).into_response();
        }
    };

    request.extensions_mut().insert(principal);
    next.run(request).await
}

async fn build_principal(state: &AppState, headers: &HeaderMap) -> AuthResult<Principal> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthError::MissingHeader {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let value = header.to_str().map_err(|_| AuthError::InvalidToken {
        message: "authorization header is not valid UTF-8".to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let scheme = state.selector.select(token)?;
    let claims = state.validator.validate(token, scheme)?;

    let mut principal = Principal::from_claims(claims, scheme);
    state.augmentor.augment(&mut principal).await;

    Ok(principal)
}
