use crate::{AuthError, AuthScheme, Result as AuthErrorResult, TokenClaims};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Holds both validation pipelines; the scheme selector decides which one
/// a given token goes through.
pub struct TokenValidator {
    internal_key: DecodingKey,
    internal_validation: Validation,
    external: Option<(DecodingKey, Validation)>,
}

impl TokenValidator {
    /// Internal pipeline: HS256 with the configured symmetric secret,
    /// issuer, and audience.
    pub fn new(secret: &[u8], issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 30; // 30 second clock skew tolerance
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        Self {
            internal_key: DecodingKey::from_secret(secret),
            internal_validation: validation,
            external: None,
        }
    }

    /// External identity provider pipeline: RS256 with the provider's
    /// public key, issuer, and audience.
    #[track_caller]
    pub fn with_external(
        mut self,
        public_key_pem: &str,
        issuer: &str,
        audience: &str,
    ) -> AuthErrorResult<Self> {
        let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            AuthError::InvalidToken {
                message: format!("Invalid RSA public key: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 30;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        self.external = Some((key, validation));
        Ok(self)
    }

    /// Validate the token through the selected pipeline and return its
    /// claims.
    #[track_caller]
    pub fn validate(&self, token: &str, scheme: AuthScheme) -> AuthErrorResult<TokenClaims> {
        let (key, validation) = match scheme {
            AuthScheme::Internal => (&self.internal_key, &self.internal_validation),
            AuthScheme::External => match &self.external {
                Some((key, validation)) => (key, validation),
                None => {
                    return Err(AuthError::InvalidToken {
                        message: "external identity provider tokens are not accepted".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            },
        };

        let token_data = decode::<TokenClaims>(token, key, validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                    location: ErrorLocation::from(Location::caller()),
                },
                _ => AuthError::JwtDecode {
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                },
            }
        })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }
}
