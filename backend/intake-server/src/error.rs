use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] intake_config::ConfigError),

    #[error("Tenant error: {0}")]
    Tenant(#[from] intake_tenant::TenantError),

    #[error("Auth error: {0}")]
    Auth(#[from] intake_auth::AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to read identity provider key file {path}: {source}")]
    IdpKeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
