use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenantError {
    /// The X-Tenant-ID header named a tenant this process does not know.
    /// Deliberately terminal: an explicit tenant claim is never reinterpreted.
    #[error("Unknown tenant '{header_value}' {location}")]
    UnknownTenant {
        header_value: String,
        location: ErrorLocation,
    },

    #[error("Malformed tenant identifier '{header_value}' {location}")]
    MalformedTenantId {
        header_value: String,
        location: ErrorLocation,
    },

    #[error("Unable to determine tenant for request {location}")]
    Unresolvable { location: ErrorLocation },

    #[error("Tenant registry cannot be empty {location}")]
    EmptyRegistry { location: ErrorLocation },

    #[error("Duplicate tenant id '{id}' in registry {location}")]
    DuplicateTenantId {
        id: uuid::Uuid,
        location: ErrorLocation,
    },
}

impl TenantError {
    /// Generic client-facing message; never discloses registry contents.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::UnknownTenant { .. } | Self::MalformedTenantId { .. } => "Invalid tenant",
            Self::Unresolvable { .. } => "Unable to determine tenant for request",
            Self::EmptyRegistry { .. } | Self::DuplicateTenantId { .. } => {
                "Tenant configuration error"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TenantError>;
