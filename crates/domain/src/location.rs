use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic classification of an IP address, normally an ISO country
/// code. One reserved value stands in whenever geolocation fails or a
/// mapping is missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCode(String);

pub const RESERVED_DEFAULT: &str = "DEFAULT";

impl LocationCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// The reserved fallback location.
    pub fn reserved_default() -> Self {
        Self(RESERVED_DEFAULT.to_string())
    }

    pub fn is_reserved_default(&self) -> bool {
        self.0 == RESERVED_DEFAULT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LocationCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}
