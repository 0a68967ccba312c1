pub mod auth;
pub mod authorize;
pub mod tenant;

pub use auth::authenticate;
pub use authorize::authorize;
pub use tenant::resolve_tenant;
