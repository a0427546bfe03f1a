use geomx_dns_domain::{DnsQuery, DomainError, LocationCode, ResponseStatus};
use hickory_proto::rr::Record;
use std::collections::HashMap;
use std::sync::Arc;

/// Result of resolving a query against one zone table.
#[derive(Debug, Clone)]
pub struct ZoneLookup {
    pub status: ResponseStatus,
    pub records: Vec<Record>,
}

impl ZoneLookup {
    pub fn nxdomain() -> Self {
        Self {
            status: ResponseStatus::NxDomain,
            records: vec![],
        }
    }
}

/// One pre-loaded zone table. Reply construction from the returned records
/// is the server handler's job; this port only answers lookups.
pub trait ZoneAuthority: Send + Sync {
    fn lookup(&self, query: &DnsQuery) -> ZoneLookup;

    fn record_count(&self) -> usize;
}

/// Immutable location -> zone-table mapping built at startup. The reserved
/// default location must be present; every unmapped client location is
/// served from it.
pub struct ZoneCatalog {
    zones: HashMap<LocationCode, Arc<dyn ZoneAuthority>>,
    default_zone: Arc<dyn ZoneAuthority>,
}

impl ZoneCatalog {
    pub fn new(
        mut zones: HashMap<LocationCode, Arc<dyn ZoneAuthority>>,
    ) -> Result<Self, DomainError> {
        let default_zone = zones
            .remove(&LocationCode::reserved_default())
            .ok_or_else(|| {
                DomainError::ZoneLoad(format!(
                    "No zone file registered for the reserved default location '{}'",
                    LocationCode::reserved_default()
                ))
            })?;
        Ok(Self {
            zones,
            default_zone,
        })
    }

    pub fn zone_for(&self, location: &LocationCode) -> Arc<dyn ZoneAuthority> {
        self.zones
            .get(location)
            .cloned()
            .unwrap_or_else(|| self.default_zone.clone())
    }

    pub fn locations(&self) -> impl Iterator<Item = &LocationCode> {
        self.zones.keys()
    }

    /// Number of tables, the default included.
    pub fn table_count(&self) -> usize {
        self.zones.len() + 1
    }
}
