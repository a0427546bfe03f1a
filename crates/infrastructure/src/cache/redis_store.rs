//! Redis-backed answer cache.
//!
//! One serialized `MxAnswer` per key, stored with SETEX so the store's own
//! expiry bounds staleness. The connection is established eagerly at
//! startup; an unreachable store is a fatal configuration problem, while
//! per-request failures degrade to cache misses upstream of here.

use async_trait::async_trait;
use geomx_dns_application::ports::{AnswerCache, CacheKey};
use geomx_dns_domain::{DomainError, MxAnswer};
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, warn};

pub struct RedisAnswerCache {
    connection: MultiplexedConnection,
}

impl RedisAnswerCache {
    pub async fn connect(server: &str) -> Result<Self, DomainError> {
        let client = redis::Client::open(format!("redis://{}/", server))
            .map_err(|e| DomainError::CacheUnavailable(format!("invalid store address: {}", e)))?;

        let connection = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| {
                DomainError::CacheUnavailable(format!("cannot reach store at {}: {}", server, e))
            })?;

        debug!(server = %server, "Answer cache connected");
        Ok(Self { connection })
    }

    fn encode(answer: &MxAnswer) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec(answer)
            .map_err(|e| DomainError::CacheUnavailable(format!("encode failure: {}", e)))
    }

    fn decode(raw: &[u8]) -> Option<MxAnswer> {
        serde_json::from_slice(raw).ok()
    }
}

#[async_trait]
impl AnswerCache for RedisAnswerCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<MxAnswer>, DomainError> {
        let mut connection = self.connection.clone();
        let raw: Option<Vec<u8>> = connection
            .get(key.to_string())
            .await
            .map_err(|e| DomainError::CacheUnavailable(e.to_string()))?;

        match raw {
            None => Ok(None),
            Some(bytes) => match Self::decode(&bytes) {
                Some(answer) => Ok(Some(answer)),
                None => {
                    // an undecodable entry is as good as absent
                    warn!(key = %key, "Discarding undecodable cache entry");
                    Ok(None)
                }
            },
        }
    }

    async fn set(
        &self,
        key: &CacheKey,
        answer: &MxAnswer,
        ttl_seconds: u32,
    ) -> Result<(), DomainError> {
        let raw = Self::encode(answer)?;
        let mut connection = self.connection.clone();
        let _: () = connection
            .set_ex(key.to_string(), raw, u64::from(ttl_seconds))
            .await
            .map_err(|e| DomainError::CacheUnavailable(e.to_string()))?;
        Ok(())
    }
}
