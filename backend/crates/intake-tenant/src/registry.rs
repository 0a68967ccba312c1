use crate::{Result, TenantError, TenantRecord};

use intake_config::TenantConfig;

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use uuid::Uuid;

/// Process-wide, read-only tenant lookup.
///
/// Loaded once at startup; reads need no synchronization. There is no
/// update or remove operation.
#[derive(Debug)]
pub struct TenantRegistry {
    /// Configuration order, which is the tie-break for origin scans
    records: Vec<Arc<TenantRecord>>,
    by_id: HashMap<Uuid, usize>,
}

impl TenantRegistry {
    /// Build the registry from configured tenant definitions.
    ///
    /// An empty tenant list is a fatal startup error, not a soft default.
    #[track_caller]
    pub fn from_config(tenants: Vec<TenantConfig>) -> Result<Self> {
        if tenants.is_empty() {
            return Err(TenantError::EmptyRegistry {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut records = Vec::with_capacity(tenants.len());
        let mut by_id = HashMap::with_capacity(tenants.len());

        for tenant in tenants {
            let record = Arc::new(TenantRecord::from(tenant));
            if by_id.insert(record.id, records.len()).is_some() {
                return Err(TenantError::DuplicateTenantId {
                    id: record.id,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            records.push(record);
        }

        Ok(Self { records, by_id })
    }

    /// O(1) lookup by tenant id.
    pub fn get(&self, id: Uuid) -> Option<Arc<TenantRecord>> {
        self.by_id.get(&id).map(|&i| Arc::clone(&self.records[i]))
    }

    /// All tenants in configuration order.
    pub fn all(&self) -> &[Arc<TenantRecord>] {
        &self.records
    }

    /// First tenant (configuration order) that lists `origin` among its
    /// frontend origins. Origins are expected to be unique per tenant;
    /// first match is the defined behavior if they are not.
    pub fn find_by_origin(&self, origin: &str) -> Option<Arc<TenantRecord>> {
        self.records
            .iter()
            .find(|r| r.allows_origin(origin))
            .map(Arc::clone)
    }

    /// Whether any registered tenant lists `origin`.
    pub fn any_tenant_allows_origin(&self, origin: &str) -> bool {
        self.records.iter().any(|r| r.allows_origin(origin))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
