use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Key/value store, `host:port`.
    #[serde(default = "default_server")]
    pub server: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
        }
    }
}

fn default_server() -> String {
    "127.0.0.1:6379".to_string()
}
