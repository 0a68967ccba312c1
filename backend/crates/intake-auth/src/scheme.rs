use crate::{AuthError, AuthScheme, Result as AuthErrorResult};

use std::panic::Location;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use error_location::ErrorLocation;

/// Chooses which token validation pipeline applies to a bearer token.
///
/// The issuer claim is read WITHOUT verifying the signature; nothing is
/// trusted here. Selection only routes the token to the pipeline that will
/// do the actual verification.
#[derive(Debug, Clone)]
pub struct SchemeSelector {
    internal_issuer: String,
}

impl SchemeSelector {
    pub fn new(internal_issuer: impl Into<String>) -> Self {
        Self {
            internal_issuer: internal_issuer.into(),
        }
    }

    /// Internal pipeline iff the unverified issuer equals the configured
    /// internal issuer; every other issuer goes to the external identity
    /// provider pipeline.
    #[track_caller]
    pub fn select(&self, token: &str) -> AuthErrorResult<AuthScheme> {
        let issuer = Self::peek_issuer(token)?;

        if issuer.as_deref() == Some(self.internal_issuer.as_str()) {
            Ok(AuthScheme::Internal)
        } else {
            Ok(AuthScheme::External)
        }
    }

    /// Decode the payload segment and read `iss`, if present.
    #[track_caller]
    fn peek_issuer(token: &str) -> AuthErrorResult<Option<String>> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) => payload,
            _ => {
                return Err(AuthError::InvalidToken {
                    message: "token is not a three-segment JWT".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| AuthError::InvalidToken {
                message: format!("payload is not valid base64url: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidToken {
                message: format!("payload is not valid JSON: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(value.get("iss").and_then(|v| v.as_str()).map(String::from))
    }
}
