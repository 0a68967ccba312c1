use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_AUDIENCE, DEFAULT_INTERNAL_ISSUER, MIN_SECRET_BYTES,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    pub internal: InternalTokenConfig,
    pub external: ExternalTokenConfig,
}

/// Validation settings for tokens this service issues itself (HS256).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InternalTokenConfig {
    pub issuer: String,
    pub audience: String,
    pub secret: Option<String>,
}

/// Validation settings for tokens issued by the external identity
/// provider (RS256, configured public key).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ExternalTokenConfig {
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub public_key_path: Option<String>,
}

impl Default for InternalTokenConfig {
    fn default() -> Self {
        Self {
            issuer: String::from(DEFAULT_INTERNAL_ISSUER),
            audience: String::from(DEFAULT_AUDIENCE),
            secret: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        let secret = self
            .internal
            .secret
            .as_deref()
            .ok_or_else(|| ConfigError::auth("auth.internal.secret is required"))?;

        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::auth(format!(
                "auth.internal.secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }

        if self.internal.issuer.is_empty() {
            return Err(ConfigError::auth("auth.internal.issuer cannot be empty"));
        }

        // External validation is optional, but when an external issuer is
        // configured its public key file must exist.
        if let Some(ref issuer) = self.external.issuer {
            if issuer.is_empty() {
                return Err(ConfigError::auth("auth.external.issuer cannot be empty"));
            }

            let key_path = self
                .external
                .public_key_path
                .as_deref()
                .ok_or_else(|| {
                    ConfigError::auth(
                        "auth.external.public_key_path is required when auth.external.issuer is set",
                    )
                })?;

            if !config_dir.join(key_path).exists() {
                return Err(ConfigError::auth(format!(
                    "auth.external.public_key_path not found: {}",
                    key_path
                )));
            }
        }

        Ok(())
    }
}
