use crate::tests::{
    EMAIL, TENANT_A, api_get, app_with, app_with_grants, body_json, grant, send, template_grant,
};

use intake_auth::{AccessType, ResourceType};

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};

#[tokio::test]
async fn given_no_authorization_header_when_requested_then_unauthorized() {
    let request = Request::builder()
        .uri("/api/v1/applications")
        .header("X-Tenant-ID", TENANT_A)
        .body(Body::empty())
        .unwrap();

    let response = send(app_with_grants(vec![]), request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn given_garbage_token_when_requested_then_unauthorized() {
    let request = Request::builder()
        .uri("/api/v1/applications")
        .header("X-Tenant-ID", TENANT_A)
        .header("Authorization", "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();

    let response = send(app_with_grants(vec![]), request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_no_grants_when_listing_applications_then_forbidden() {
    let response = send(app_with_grants(vec![]), api_get("/api/v1/applications")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
async fn given_one_application_grant_when_listing_then_only_that_id_is_visible() {
    let app = app_with_grants(vec![
        grant(ResourceType::Application, "app-1", AccessType::Read),
        grant(ResourceType::File, "file-9", AccessType::Read),
    ]);

    let response = send(app, api_get("/api/v1/applications")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["applications"], serde_json::json!(["app-1"]));
}

#[tokio::test]
async fn given_exact_grant_when_reading_that_application_then_ok() {
    let app = app_with_grants(vec![grant(
        ResourceType::Application,
        "app-1",
        AccessType::Read,
    )]);

    let response = send(app, api_get("/api/v1/applications/app-1")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["application"]["id"], "app-1");
    assert_eq!(body["application"]["tenant_id"], TENANT_A);
}

#[tokio::test]
async fn given_exact_grant_when_reading_another_application_then_forbidden() {
    let app = app_with_grants(vec![grant(
        ResourceType::Application,
        "app-1",
        AccessType::Read,
    )]);

    let response = send(app, api_get("/api/v1/applications/app-2")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn given_read_grant_only_when_updating_application_then_forbidden() {
    let app = app_with_grants(vec![grant(
        ResourceType::Application,
        "app-1",
        AccessType::Read,
    )]);
    let mut request = api_get("/api/v1/applications/app-1");
    *request.method_mut() = Method::PUT;

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn given_write_grant_when_updating_application_then_ok() {
    let app = app_with_grants(vec![grant(
        ResourceType::Application,
        "app-1",
        AccessType::Write,
    )]);
    let mut request = api_get("/api/v1/applications/app-1");
    *request.method_mut() = Method::PUT;

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["application"]["status"], "updated");
}

#[tokio::test]
async fn given_files_grant_when_listing_application_files_then_ok() {
    let app = app_with_grants(vec![
        grant(ResourceType::ApplicationFiles, "app-1", AccessType::Read),
        grant(ResourceType::File, "file-9", AccessType::Read),
    ]);

    let response = send(app, api_get("/api/v1/applications/app-1/files")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["files"], serde_json::json!(["file-9"]));
}

#[tokio::test]
async fn given_file_grant_when_reading_file_then_ok() {
    let app = app_with_grants(vec![grant(ResourceType::File, "file-9", AccessType::Read)]);

    let response = send(app, api_get("/api/v1/files/file-9")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["file"]["id"], "file-9");
}

#[tokio::test]
async fn given_user_grant_for_own_email_when_reading_that_user_then_ok() {
    let app = app_with_grants(vec![grant(ResourceType::User, EMAIL, AccessType::Read)]);

    let response = send(app, api_get(&format!("/api/v1/users/{}", EMAIL))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], EMAIL);
    assert_eq!(body["user"]["email"], EMAIL);
}

#[tokio::test]
async fn given_user_grant_for_own_email_when_reading_other_user_then_forbidden() {
    let app = app_with_grants(vec![grant(ResourceType::User, EMAIL, AccessType::Read)]);

    let response = send(app, api_get("/api/v1/users/other@acme.example")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn given_notifications_grant_on_caller_identity_when_listing_then_ok() {
    // No route key on this endpoint: the resource key falls back to the
    // caller's email claim.
    let app = app_with_grants(vec![grant(
        ResourceType::Notifications,
        EMAIL,
        AccessType::Read,
    )]);

    let response = send(app, api_get("/api/v1/notifications")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["identity"], EMAIL);
    assert_eq!(body["channels"], serde_json::json!([EMAIL]));
}

#[tokio::test]
async fn given_no_notifications_grant_when_listing_then_forbidden() {
    let app = app_with_grants(vec![grant(
        ResourceType::Application,
        "app-1",
        AccessType::Read,
    )]);

    let response = send(app, api_get("/api/v1/notifications")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn given_template_grant_when_listing_templates_then_ok() {
    let app = app_with(vec![], vec![template_grant("tpl-1", AccessType::Read)]);

    let response = send(app, api_get("/api/v1/templates")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["templates"], serde_json::json!(["tpl-1"]));
}

#[tokio::test]
async fn given_template_grant_when_reading_that_template_then_ok() {
    let app = app_with(vec![], vec![template_grant("tpl-1", AccessType::Read)]);

    let response = send(app, api_get("/api/v1/templates/tpl-1")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["template"]["id"], "tpl-1");
}

#[tokio::test]
async fn given_template_grant_when_reading_another_template_then_forbidden() {
    // Holding some template grant clears the visibility gate, but the
    // requested id still needs its own exact claim.
    let app = app_with(vec![], vec![template_grant("tpl-1", AccessType::Read)]);

    let response = send(app, api_get("/api/v1/templates/tpl-2")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
