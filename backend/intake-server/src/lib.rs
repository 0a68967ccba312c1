pub mod api;
pub mod cache;
pub mod error;
pub mod health;
pub mod logger;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

pub use api::error::{ApiError, Result as ApiResult};
pub use cache::InMemoryCache;
pub use error::{Result as ServerResult, ServerError};
pub use routes::build_router;
pub use state::AppState;
pub use store::SqlitePermissionStore;

#[cfg(test)]
mod tests;
