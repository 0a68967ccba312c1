mod jwt;

use crate::{AuthScheme, PermissionClaim, Principal};

/// Principal carrying the given wire-form permission claims.
pub(crate) fn principal_with(claims: &[&str]) -> Principal {
    Principal {
        subject: "user-123".to_string(),
        email: Some("user@acme.example".to_string()),
        client_id: Some("svc-client".to_string()),
        scheme: AuthScheme::Internal,
        permissions: claims
            .iter()
            .map(|c| c.parse::<PermissionClaim>().unwrap())
            .collect(),
    }
}

pub(crate) fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
