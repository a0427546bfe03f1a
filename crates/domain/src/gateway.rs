use super::location::LocationCode;
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// Static mapping from mail-host location to outbound mail gateway,
/// built once at startup. Lookups for any location without an entry
/// (including the reserved default) fall back to the default gateway.
#[derive(Debug, Clone)]
pub struct GatewayTable {
    entries: HashMap<LocationCode, Ipv4Addr>,
    default_gateway: Ipv4Addr,
}

impl GatewayTable {
    pub fn new(entries: HashMap<LocationCode, Ipv4Addr>, default_gateway: Ipv4Addr) -> Self {
        Self {
            entries,
            default_gateway,
        }
    }

    pub fn gateway_for(&self, location: &LocationCode) -> Ipv4Addr {
        self.entries
            .get(location)
            .copied()
            .unwrap_or(self.default_gateway)
    }

    pub fn default_gateway(&self) -> Ipv4Addr {
        self.default_gateway
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
