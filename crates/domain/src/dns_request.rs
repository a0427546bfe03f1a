use super::dns_record::RecordType;
use std::net::IpAddr;
use std::sync::Arc;

/// Transport class the client used to reach us. Forwarded queries reuse it
/// so a TCP client is proxied over TCP and a UDP client over UDP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportClass {
    Udp,
    Tcp,
}

impl TransportClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportClass::Udp => "UDP",
            TransportClass::Tcp => "TCP",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub client_ip: IpAddr,
    pub transport: TransportClass,
}

impl DnsRequest {
    pub fn new(
        domain: impl Into<Arc<str>>,
        record_type: RecordType,
        client_ip: IpAddr,
        transport: TransportClass,
    ) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            client_ip,
            transport,
        }
    }
}
