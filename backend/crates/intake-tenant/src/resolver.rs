use crate::{Result, TenantError, TenantRecord, TenantRegistry};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use http::{HeaderMap, Method, header};
use log::debug;
use uuid::Uuid;

/// Header carrying an explicit tenant identifier.
pub const TENANT_HEADER: &str = "X-Tenant-ID";

/// Paths exempt from tenant resolution: they serve cross-tenant or
/// pre-authentication concerns (health probes, API docs, infrastructure).
const BYPASS_PREFIXES: [&str; 3] = ["/swagger", "/health", "/_"];

/// Outcome of resolving one request.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Exempt path or preflight; the request proceeds with no tenant.
    Bypassed,
    Resolved(Arc<TenantRecord>),
}

/// Per-request tenant selection.
///
/// Deterministic and synchronous; a failed resolution is terminal for the
/// request and is never retried.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    registry: Arc<TenantRegistry>,
}

impl TenantResolver {
    pub fn new(registry: Arc<TenantRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<TenantRegistry> {
        &self.registry
    }

    /// Ordered algorithm, first match wins:
    /// 1. OPTIONS or a bypass-prefixed path: skip resolution entirely.
    /// 2. X-Tenant-ID header: strict registry lookup. An unknown or
    ///    malformed value fails immediately; it never falls through to
    ///    the Origin scan.
    /// 3. Origin header: first registered tenant listing the origin
    ///    (case-insensitive, registry order is the tie-break).
    /// 4. Otherwise fail.
    #[track_caller]
    pub fn resolve(&self, method: &Method, path: &str, headers: &HeaderMap) -> Result<Resolution> {
        if Self::is_bypassed(method, path) {
            debug!("Tenant resolution bypassed for {} {}", method, path);
            return Ok(Resolution::Bypassed);
        }

        if let Some(value) = headers.get(TENANT_HEADER) {
            let raw = value.to_str().unwrap_or_default();

            let id = Uuid::parse_str(raw).map_err(|_| TenantError::MalformedTenantId {
                header_value: raw.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

            return match self.registry.get(id) {
                Some(tenant) => {
                    debug!("Tenant '{}' resolved from {} header", tenant.name, TENANT_HEADER);
                    Ok(Resolution::Resolved(tenant))
                }
                None => Err(TenantError::UnknownTenant {
                    header_value: raw.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }),
            };
        }

        if let Some(origin) = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok()) {
            if let Some(tenant) = self.registry.find_by_origin(origin) {
                debug!("Tenant '{}' resolved from Origin '{}'", tenant.name, origin);
                return Ok(Resolution::Resolved(tenant));
            }
        }

        Err(TenantError::Unresolvable {
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn is_bypassed(method: &Method, path: &str) -> bool {
        method == Method::OPTIONS || BYPASS_PREFIXES.iter().any(|p| path.starts_with(p))
    }
}
