//! Per-route authorization middleware
//!
//! Each protected route carries its `Requirement` as a route-layer
//! extension; this middleware evaluates it against the augmented principal.
//! Evaluation is a pure claim-set lookup, so a denial costs no I/O.

use crate::ApiError;

use intake_auth::{Principal, Requirement, evaluate};

use std::panic::Location;

use axum::{
    Extension,
    extract::{RawPathParams, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use log::debug;

pub async fn authorize(
    params: RawPathParams,
    Extension(requirement): Extension<Requirement>,
    principal: Option<Extension<Principal>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(Extension(principal)) = principal else {
        return ApiError::Unauthorized {
            detail: "no principal on request".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
        .into_response();
    };

    let route_params: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    if !evaluate(&requirement, &principal, &route_params) {
        debug!(
            "Authorization denied for '{}' on {:?} {:?}",
            principal.subject, requirement.resource_type, requirement.action
        );
        return ApiError::Forbidden {
            location: ErrorLocation::from(Location::caller()),
        }
        .into_response();
    }

    next.run(request).await
}
