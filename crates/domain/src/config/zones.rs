use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZonesConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of zone files. The location code is taken from the
    /// filename suffix after the last `-`.
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Match zone record owner names as globs instead of equality.
    #[serde(default)]
    pub glob: bool,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_port(),
            directory: default_directory(),
            glob: false,
        }
    }
}

fn default_port() -> u16 {
    5353
}

fn default_directory() -> String {
    "zones".to_string()
}
