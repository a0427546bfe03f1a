use super::errors::ConfigError;
use crate::gateway::GatewayTable;
use crate::location::LocationCode;
use crate::matcher::SkipList;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InterceptConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Glob patterns for query names exempted from interception.
    #[serde(default)]
    pub skip: Vec<String>,

    /// Location code -> outbound mail gateway.
    #[serde(default = "default_gateways")]
    pub gateways: HashMap<String, String>,

    /// Gateway for every location without an explicit entry.
    #[serde(default = "default_default_gateway")]
    pub default_gateway: String,
}

impl InterceptConfig {
    pub fn build_gateway_table(&self) -> Result<GatewayTable, ConfigError> {
        let default_gateway: Ipv4Addr = self.default_gateway.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid default gateway address '{}'",
                self.default_gateway
            ))
        })?;

        let mut entries = HashMap::with_capacity(self.gateways.len());
        for (location, address) in &self.gateways {
            let gateway: Ipv4Addr = address.parse().map_err(|_| {
                ConfigError::Validation(format!(
                    "Invalid gateway address '{}' for location '{}'",
                    address, location
                ))
            })?;
            entries.insert(LocationCode::new(location), gateway);
        }

        Ok(GatewayTable::new(entries, default_gateway))
    }

    pub fn build_skip_list(&self) -> SkipList {
        SkipList::compile(&self.skip)
    }
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_port(),
            skip: vec![],
            gateways: default_gateways(),
            default_gateway: default_default_gateway(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_port() -> u16 {
    53
}

fn default_gateways() -> HashMap<String, String> {
    HashMap::from([("CN".to_string(), "192.168.200.133".to_string())])
}

fn default_default_gateway() -> String {
    "172.21.175.245".to_string()
}
