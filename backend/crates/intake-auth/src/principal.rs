use crate::{PermissionClaim, TokenClaims};

/// Which validation pipeline produced a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Token issued by this service (symmetric key)
    Internal,
    /// Token issued by the external identity provider
    External,
}

/// Authenticated caller for the duration of one request.
///
/// Permissions are attached once by the claims augmentor after token
/// validation and are never re-queried per authorization check.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: String,
    pub email: Option<String>,
    pub client_id: Option<String>,
    pub scheme: AuthScheme,
    pub permissions: Vec<PermissionClaim>,
}

impl Principal {
    pub fn from_claims(claims: TokenClaims, scheme: AuthScheme) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
            client_id: claims.azp,
            scheme,
            permissions: Vec::new(),
        }
    }

    /// Stable identity used for permission store lookups:
    /// email first, machine client identifier second.
    pub fn identity(&self) -> Option<&str> {
        self.email
            .as_deref()
            .filter(|e| !e.is_empty())
            .or(self.client_id.as_deref().filter(|c| !c.is_empty()))
    }
}
