use crate::{AuthError, AuthScheme, TokenValidator};

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
const ISSUER: &str = "intake";
const AUDIENCE: &str = "intake-api";

fn validator() -> TokenValidator {
    TokenValidator::new(SECRET, ISSUER, AUDIENCE)
}

fn token(claims: &serde_json::Value, secret: &[u8]) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

fn valid_claims() -> serde_json::Value {
    serde_json::json!({
        "sub": "user-123",
        "iss": ISSUER,
        "aud": AUDIENCE,
        "exp": chrono::Utc::now().timestamp() + 3600,
        "iat": chrono::Utc::now().timestamp(),
        "email": "user@acme.example",
    })
}

#[test]
fn given_valid_internal_token_when_validated_then_returns_claims() {
    let token = token(&valid_claims(), SECRET);

    let claims = validator().validate(&token, AuthScheme::Internal).unwrap();

    assert_eq!(claims.sub, "user-123");
    assert_eq!(claims.email.as_deref(), Some("user@acme.example"));
}

#[test]
fn given_expired_token_when_validated_then_token_expired() {
    let mut claims = valid_claims();
    claims["exp"] = serde_json::json!(chrono::Utc::now().timestamp() - 3600);
    let token = token(&claims, SECRET);

    let result = validator().validate(&token, AuthScheme::Internal);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_wrong_secret_when_validated_then_decode_error() {
    let token = token(&valid_claims(), b"wrong-secret-key-at-least-32-byt");

    let result = validator().validate(&token, AuthScheme::Internal);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_wrong_issuer_when_validated_then_decode_error() {
    let mut claims = valid_claims();
    claims["iss"] = serde_json::json!("somebody-else");
    let token = token(&claims, SECRET);

    let result = validator().validate(&token, AuthScheme::Internal);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_wrong_audience_when_validated_then_decode_error() {
    let mut claims = valid_claims();
    claims["aud"] = serde_json::json!("another-api");
    let token = token(&claims, SECRET);

    let result = validator().validate(&token, AuthScheme::Internal);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_empty_subject_when_validated_then_invalid_claim() {
    let mut claims = valid_claims();
    claims["sub"] = serde_json::json!("");
    let token = token(&claims, SECRET);

    let result = validator().validate(&token, AuthScheme::Internal);

    assert!(matches!(result, Err(AuthError::InvalidClaim { .. })));
}

#[test]
fn given_no_external_pipeline_when_external_token_validated_then_rejected() {
    let token = token(&valid_claims(), SECRET);

    let result = validator().validate(&token, AuthScheme::External);

    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}

#[test]
fn given_bad_external_public_key_when_configured_then_error() {
    let result = validator().with_external("not a pem", "https://idp.example.com/", AUDIENCE);

    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}
