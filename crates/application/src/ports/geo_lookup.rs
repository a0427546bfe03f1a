use geomx_dns_domain::LocationCode;
use std::net::IpAddr;

/// IP-to-location lookup. Total: implementations catch every lookup error
/// (invalid address, reader error, address not found) and return the
/// configured default location.
pub trait GeoLookup: Send + Sync {
    fn locate(&self, address: &str) -> LocationCode;

    fn locate_ip(&self, ip: IpAddr) -> LocationCode {
        self.locate(&ip.to_string())
    }
}
