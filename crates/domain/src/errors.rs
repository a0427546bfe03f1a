use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Upstream query timed out after {timeout_ms}ms ({server})")]
    UpstreamTimeout { server: String, timeout_ms: u64 },

    #[error("Upstream transport error ({server}): {reason}")]
    UpstreamTransport { server: String, reason: String },

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Cache store unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Geolocation lookup failed: {0}")]
    GeolocationFailure(String),

    #[error("Zone load error: {0}")]
    ZoneLoad(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
