pub mod applications;
pub mod error;
pub mod extractors;
pub mod files;
pub mod notifications;
pub mod templates;
pub mod users;
