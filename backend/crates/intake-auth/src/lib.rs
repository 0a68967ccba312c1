pub mod augment;
pub mod authorize;
pub mod claims;
pub mod error;
pub mod permission;
pub mod principal;
pub mod scheme;
pub mod validator;

pub use augment::{
    ClaimsAugmentor, PermissionGrant, PermissionStore, PermissionStoreError, TemplateGrant,
};
pub use authorize::{MatchPolicy, Requirement, ResourceKeySource, evaluate};
pub use claims::TokenClaims;
pub use error::{AuthError, Result};
pub use permission::{AccessType, PERMISSION_CLAIM_TYPE, PermissionClaim, ResourceType};
pub use principal::{AuthScheme, Principal};
pub use scheme::SchemeSelector;
pub use validator::TokenValidator;

#[cfg(test)]
mod tests;
