use async_trait::async_trait;
use geomx_dns_domain::{DomainError, MxAnswer};
use std::fmt;

/// Cache key for rewritten MX answers: `mx:{location}:{name}`.
///
/// The name is embedded verbatim, normalized for case and trailing root
/// dot. The location partition is empty in the base design (the gateway
/// choice depends on the mail host's location, not the querying client's)
/// but stays in the key format for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    location: String,
    name: String,
}

impl CacheKey {
    pub fn new(name: &str) -> Self {
        Self::partitioned("", name)
    }

    pub fn partitioned(location: &str, name: &str) -> Self {
        Self {
            location: location.to_string(),
            name: name.trim_end_matches('.').to_ascii_lowercase(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mx:{}:{}", self.location, self.name)
    }
}

/// TTL-aware external key/value store holding one serialized answer per
/// key. The store's own expiry governs eviction.
#[async_trait]
pub trait AnswerCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<MxAnswer>, DomainError>;

    async fn set(
        &self,
        key: &CacheKey,
        answer: &MxAnswer,
        ttl_seconds: u32,
    ) -> Result<(), DomainError>;
}
