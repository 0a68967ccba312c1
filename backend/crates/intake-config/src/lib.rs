mod auth_config;
mod config;
mod cors_config;
mod error;
mod logging_config;
mod permissions_config;
mod server_config;
mod tenant_config;

pub use auth_config::{AuthConfig, ExternalTokenConfig, InternalTokenConfig};
pub use config::Config;
pub use cors_config::{CorsConfig, CorsPolicyConfig};
pub use error::{ConfigError, ConfigErrorResult};
pub use logging_config::{LogLevel, LoggingConfig};
pub use permissions_config::PermissionsConfig;
pub use server_config::ServerConfig;
pub use tenant_config::TenantConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_INTERNAL_ISSUER: &str = "intake";
const DEFAULT_AUDIENCE: &str = "intake-api";
const MIN_SECRET_BYTES: usize = 32;
const DEFAULT_PERMISSIONS_DB: &str = "permissions.db";
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 500;

#[cfg(test)]
mod tests;
