use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::tcp::TcpTransport;
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use geomx_dns_application::ports::{UpstreamReply, UpstreamResolver};
use geomx_dns_domain::{DnsQuery, DomainError, TransportClass};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Upstream resolver client: one fixed server, one fixed timeout, the
/// transport class chosen per call by the caller. No retries.
pub struct UpstreamForwarder {
    server_addr: SocketAddr,
    timeout: Duration,
    udp: UdpTransport,
    tcp: TcpTransport,
}

impl UpstreamForwarder {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
            udp: UdpTransport::new(server_addr),
            tcp: TcpTransport::new(server_addr),
        }
    }
}

#[async_trait]
impl UpstreamResolver for UpstreamForwarder {
    async fn forward(
        &self,
        query: &DnsQuery,
        transport: TransportClass,
    ) -> Result<UpstreamReply, DomainError> {
        let request_bytes = MessageBuilder::build_query(&query.domain, query.record_type)?;

        debug!(
            server = %self.server_addr,
            domain = %query.domain,
            record_type = %query.record_type,
            transport = transport.as_str(),
            "Forwarding query upstream"
        );

        let response = match transport {
            TransportClass::Udp => self.udp.send(&request_bytes, self.timeout).await?,
            TransportClass::Tcp => self.tcp.send(&request_bytes, self.timeout).await?,
        };

        ResponseParser::parse(&response.bytes, response.protocol_used)
    }
}
