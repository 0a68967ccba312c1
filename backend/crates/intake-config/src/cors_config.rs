use std::collections::BTreeMap;

use serde::Deserialize;

/// Named CORS policies that are not tenant-scoped.
///
/// The well-known "Frontend" policy is derived from the resolved tenant at
/// request time and never configured here; any other policy name falls back
/// to this table.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    pub policies: BTreeMap<String, CorsPolicyConfig>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CorsPolicyConfig {
    pub origins: Vec<String>,
    pub allow_credentials: bool,
}
