use crate::ports::{GeoLookup, ZoneCatalog, ZoneLookup};
use geomx_dns_domain::DnsQuery;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// Geo zone selection: locate the querying client, pick that location's
/// zone table (default table when unmapped) and delegate the lookup to it.
pub struct SelectZoneUseCase {
    geo: Arc<dyn GeoLookup>,
    zones: Arc<ZoneCatalog>,
}

impl SelectZoneUseCase {
    pub fn new(geo: Arc<dyn GeoLookup>, zones: Arc<ZoneCatalog>) -> Self {
        Self { geo, zones }
    }

    pub fn execute(&self, client_ip: IpAddr, query: &DnsQuery) -> ZoneLookup {
        let location = self.geo.locate_ip(client_ip);
        let zone = self.zones.zone_for(&location);
        debug!(client = %client_ip, location = %location, domain = %query.domain, "Zone selected");
        zone.lookup(query)
    }
}
