use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, CorsConfig, LoggingConfig, PermissionsConfig,
    ServerConfig, TenantConfig,
};

use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub permissions: PermissionsConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    pub tenants: Vec<TenantConfig>,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for INTAKE_CONFIG_DIR env var, else use ./.intake/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply INTAKE_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: INTAKE_CONFIG_DIR env var > ./.intake/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("INTAKE_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".intake"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.auth.validate(&config_dir)?;
        self.permissions.validate()?;
        self.validate_tenants()?;

        Ok(())
    }

    /// The tenant registry is a hard startup precondition: a process with
    /// zero tenants cannot serve any request, so refuse to start.
    fn validate_tenants(&self) -> ConfigErrorResult<()> {
        if self.tenants.is_empty() {
            return Err(ConfigError::tenant(
                "at least one [[tenants]] entry is required",
            ));
        }

        let mut seen = HashSet::new();
        for tenant in &self.tenants {
            if !seen.insert(tenant.id) {
                return Err(ConfigError::tenant(format!(
                    "duplicate tenant id: {}",
                    tenant.id
                )));
            }

            if tenant.name.is_empty() {
                return Err(ConfigError::tenant(format!(
                    "tenant {} has an empty name",
                    tenant.id
                )));
            }
        }

        Ok(())
    }

    /// Get absolute path to the permission store database file.
    pub fn permissions_database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.permissions.database_path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  tenants: {}", self.tenants.len());

        for tenant in &self.tenants {
            info!(
                "    {} ({}, {} origin(s))",
                tenant.name,
                tenant.id,
                tenant.frontend_origins.len()
            );
        }

        info!(
            "  auth: internal issuer '{}', external issuer {}",
            self.auth.internal.issuer,
            self.auth
                .external
                .issuer
                .as_deref()
                .unwrap_or("(not configured)")
        );

        info!(
            "  permissions: {} (timeout {}ms)",
            self.permissions.database_path, self.permissions.query_timeout_ms
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("INTAKE_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("INTAKE_SERVER_PORT", &mut self.server.port);

        // Auth
        Self::apply_env_string("INTAKE_AUTH_INTERNAL_ISSUER", &mut self.auth.internal.issuer);
        Self::apply_env_string(
            "INTAKE_AUTH_INTERNAL_AUDIENCE",
            &mut self.auth.internal.audience,
        );
        Self::apply_env_option_string(
            "INTAKE_AUTH_INTERNAL_SECRET",
            &mut self.auth.internal.secret,
        );
        Self::apply_env_option_string("INTAKE_AUTH_EXTERNAL_ISSUER", &mut self.auth.external.issuer);
        Self::apply_env_option_string(
            "INTAKE_AUTH_EXTERNAL_AUDIENCE",
            &mut self.auth.external.audience,
        );
        Self::apply_env_option_string(
            "INTAKE_AUTH_EXTERNAL_PUBLIC_KEY_PATH",
            &mut self.auth.external.public_key_path,
        );

        // Permissions
        Self::apply_env_string(
            "INTAKE_PERMISSIONS_DATABASE_PATH",
            &mut self.permissions.database_path,
        );
        Self::apply_env_parse(
            "INTAKE_PERMISSIONS_QUERY_TIMEOUT_MS",
            &mut self.permissions.query_timeout_ms,
        );

        // Logging
        Self::apply_env_parse("INTAKE_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("INTAKE_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("INTAKE_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(key: &str, target: &mut String) {
        if let Ok(value) = std::env::var(key) {
            *target = value;
        }
    }

    fn apply_env_option_string(key: &str, target: &mut Option<String>) {
        if let Ok(value) = std::env::var(key) {
            *target = Some(value);
        }
    }

    fn apply_env_parse<T: FromStr>(key: &str, target: &mut T) {
        if let Ok(value) = std::env::var(key) {
            if let Ok(parsed) = value.parse() {
                *target = parsed;
            } else {
                log::warn!("Ignoring unparseable env override {}={}", key, value);
            }
        }
    }

    fn apply_env_bool(key: &str, target: &mut bool) {
        if let Ok(value) = std::env::var(key) {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => *target = true,
                "0" | "false" | "no" => *target = false,
                _ => log::warn!("Ignoring unparseable env override {}={}", key, value),
            }
        }
    }
}
