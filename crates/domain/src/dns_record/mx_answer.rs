use super::RecordClass;
use serde::{Deserialize, Serialize};

/// A single MX resource record as served (and cached) by the intercept
/// pipeline: the original query name, TTL, class and preference, with the
/// exchange replaced by the selected gateway address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxAnswer {
    pub domain: String,
    pub ttl: u32,
    pub class: RecordClass,
    pub preference: Option<u16>,
    pub exchange: String,
}

impl MxAnswer {
    pub fn new(
        domain: String,
        ttl: u32,
        class: RecordClass,
        preference: Option<u16>,
        exchange: String,
    ) -> Self {
        Self {
            domain,
            ttl,
            class,
            preference,
            exchange,
        }
    }
}
