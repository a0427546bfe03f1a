//! MaxMind country-database geo lookup.
//!
//! The database is opened once at startup (an unreadable file aborts
//! startup). Per-request lookups are total: any failure (unparseable
//! address, reader error, address not in the database, record without a
//! country) collapses to the configured default location.

use geomx_dns_application::ports::GeoLookup;
use geomx_dns_domain::{DomainError, LocationCode};
use maxminddb::geoip2;
use std::net::IpAddr;
use tracing::debug;

pub struct MaxmindGeoLookup {
    reader: maxminddb::Reader<Vec<u8>>,
    default_location: LocationCode,
}

impl MaxmindGeoLookup {
    pub fn open(path: &str, default_location: LocationCode) -> Result<Self, DomainError> {
        let reader = maxminddb::Reader::open_readfile(path).map_err(|e| {
            DomainError::GeolocationFailure(format!("cannot open geo database {}: {}", path, e))
        })?;
        debug!(path = %path, "Geo database loaded");
        Ok(Self {
            reader,
            default_location,
        })
    }
}

impl GeoLookup for MaxmindGeoLookup {
    fn locate(&self, address: &str) -> LocationCode {
        let ip: IpAddr = match address.parse() {
            Ok(ip) => ip,
            Err(_) => return self.default_location.clone(),
        };

        match self.reader.lookup::<geoip2::Country>(ip) {
            Ok(country) => country
                .country
                .and_then(|c| c.iso_code)
                .map(LocationCode::new)
                .unwrap_or_else(|| self.default_location.clone()),
            Err(_) => self.default_location.clone(),
        }
    }
}
