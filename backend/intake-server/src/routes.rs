use crate::{
    api::{applications, files, notifications, templates, users},
    health,
    middleware::{authenticate, authorize, resolve_tenant},
    state::AppState,
};

use intake_auth::{AccessType, Requirement, ResourceType};
use intake_tenant::{FRONTEND_POLICY_NAME, TenantContext};

use axum::{
    Extension, Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{MethodRouter, get, put},
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

const READ_APPLICATION: Requirement =
    Requirement::exact(ResourceType::Application, AccessType::Read, "application_id");
const WRITE_APPLICATION: Requirement = Requirement::exact(
    ResourceType::Application,
    AccessType::Write,
    "application_id",
);
const ANY_APPLICATION: Requirement =
    Requirement::any_of_type(ResourceType::Application, AccessType::Read);
const READ_APPLICATION_FILES: Requirement = Requirement::exact(
    ResourceType::ApplicationFiles,
    AccessType::Read,
    "application_id",
);
const READ_FILE: Requirement = Requirement::exact(ResourceType::File, AccessType::Read, "file_id");
const READ_USER: Requirement =
    Requirement::caller_scoped(ResourceType::User, AccessType::Read, Some("user_id"));
const READ_NOTIFICATIONS: Requirement =
    Requirement::caller_scoped(ResourceType::Notifications, AccessType::Read, None);
const ANY_TEMPLATE: Requirement =
    Requirement::any_of_type(ResourceType::Template, AccessType::Read);
const READ_TEMPLATE: Requirement =
    Requirement::hierarchical(ResourceType::Template, AccessType::Read, "template_id");

/// Wrap a handler with the authorization check for one requirement.
///
/// The requirement rides in as a route-layer extension so a single
/// middleware serves every route.
fn protected(handler: MethodRouter<AppState>, requirement: Requirement) -> MethodRouter<AppState> {
    handler
        .layer::<_, std::convert::Infallible>(from_fn(authorize))
        .layer(Extension(requirement))
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            protected(get(applications::list_applications), ANY_APPLICATION),
        )
        .route(
            "/applications/{application_id}",
            protected(get(applications::get_application), READ_APPLICATION).merge(protected(
                put(applications::update_application),
                WRITE_APPLICATION,
            )),
        )
        .route(
            "/applications/{application_id}/files",
            protected(get(files::list_application_files), READ_APPLICATION_FILES),
        )
        .route(
            "/files/{file_id}",
            protected(get(files::get_file), READ_FILE),
        )
        .route(
            "/users/{user_id}",
            protected(get(users::get_user), READ_USER),
        )
        .route(
            "/notifications",
            protected(get(notifications::list_notifications), READ_NOTIFICATIONS),
        )
        .route(
            "/templates",
            protected(get(templates::list_templates), ANY_TEMPLATE),
        )
        .route(
            "/templates/{template_id}",
            protected(get(templates::get_template), READ_TEMPLATE),
        )
        .layer(from_fn_with_state(state, authenticate))
}

/// CORS middleware whose allowed origin set depends on the resolved tenant.
///
/// The origin predicate reads the `TenantContext` extension left by the
/// tenant middleware, so the resolution layer must sit outside this one.
/// Preflight bypasses tenant resolution, so an unresolved context falls
/// back to the union of registered tenant origins.
fn tenant_cors(state: &AppState) -> CorsLayer {
    let provider = state.cors.clone();
    let registry = state.registry.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, parts| {
            let Ok(origin) = origin.to_str() else {
                return false;
            };

            match parts.extensions.get::<TenantContext>() {
                Some(ctx) if ctx.is_resolved() => provider
                    .get_policy(ctx, FRONTEND_POLICY_NAME)
                    .is_some_and(|policy| policy.allows_origin(origin)),
                _ => registry.any_tenant_allows_origin(origin),
            }
        }))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the application router with all endpoints.
///
/// Layer order matters: tenant resolution is the outermost layer so the
/// CORS layer underneath can read the resolved tenant context.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .layer(tenant_cors(&state))
        .layer(from_fn_with_state(state.clone(), resolve_tenant))
        .with_state(state)
}
