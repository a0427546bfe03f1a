//! TCP transport for upstream DNS queries (RFC 1035 §4.2.2, 2-byte length
//! framing). Idle connections are pooled per upstream host.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dashmap::DashMap;
use geomx_dns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65535;
const MAX_IDLE_TCP_PER_HOST: usize = 2;

type TcpConnectionPool = DashMap<String, Vec<TcpStream>>;

static TCP_POOL: LazyLock<TcpConnectionPool> = LazyLock::new(TcpConnectionPool::new);

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn pool_key(&self) -> String {
        self.server_addr.to_string()
    }

    fn take_pooled(&self) -> Option<TcpStream> {
        TCP_POOL.get_mut(&self.pool_key())?.pop()
    }

    fn return_to_pool(&self, stream: TcpStream) {
        let mut entry = TCP_POOL.entry(self.pool_key()).or_default();
        if entry.len() < MAX_IDLE_TCP_PER_HOST {
            entry.push(stream);
        }
    }

    fn timeout_error(&self, timeout: Duration) -> DomainError {
        DomainError::UpstreamTimeout {
            server: self.server_addr.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    fn transport_error(&self, reason: impl ToString) -> DomainError {
        DomainError::UpstreamTransport {
            server: self.server_addr.to_string(),
            reason: reason.to_string(),
        }
    }

    async fn connect_new(&self, timeout: Duration) -> Result<TcpStream, DomainError> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| self.timeout_error(timeout))?
            .map_err(|e| self.transport_error(format!("connection failed: {}", e)))?;

        stream
            .set_nodelay(true)
            .map_err(|e| self.transport_error(format!("failed to set TCP_NODELAY: {}", e)))?;

        Ok(stream)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let mut stream = match self.take_pooled() {
            Some(s) => s,
            None => self.connect_new(timeout).await?,
        };

        // A pooled connection may have gone stale; retry the send once on a
        // fresh connection before giving up.
        let send_result =
            tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, message_bytes))
                .await;

        let mut stream = match send_result {
            Ok(Ok(())) => stream,
            _ => {
                let mut fresh = self.connect_new(timeout).await?;
                tokio::time::timeout(timeout, send_with_length_prefix(&mut fresh, message_bytes))
                    .await
                    .map_err(|_| self.timeout_error(timeout))?
                    .map_err(|e| self.transport_error(format!("failed to send query: {}", e)))?;
                fresh
            }
        };

        debug!(server = %self.server_addr, message_len = message_bytes.len(), "TCP query sent");

        let response_bytes = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| self.timeout_error(timeout))?
            .map_err(|e| self.transport_error(e))?;

        debug!(server = %self.server_addr, response_len = response_bytes.len(), "TCP response received");

        self.return_to_pool(stream);

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

async fn send_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> Result<(), String>
where
    S: AsyncWriteExt + Unpin,
{
    let length = message_bytes.len() as u16;
    stream
        .write_all(&length.to_be_bytes())
        .await
        .map_err(|e| format!("failed to write length prefix: {}", e))?;
    stream
        .write_all(message_bytes)
        .await
        .map_err(|e| format!("failed to write DNS message: {}", e))?;
    stream
        .flush()
        .await
        .map_err(|e| format!("failed to flush stream: {}", e))?;

    Ok(())
}

async fn read_with_length_prefix<S>(stream: &mut S) -> Result<Vec<u8>, String>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| format!("failed to read response length: {}", e))?;

    let response_len = u16::from_be_bytes(len_buf) as usize;

    if response_len > MAX_TCP_MESSAGE_SIZE {
        return Err(format!(
            "response too large: {} bytes (max {})",
            response_len, MAX_TCP_MESSAGE_SIZE
        ));
    }

    let mut response = vec![0u8; response_len];
    stream
        .read_exact(&mut response)
        .await
        .map_err(|e| format!("failed to read response body: {}", e))?;

    Ok(response)
}
