/// The decomposed rdata of an MX answer in presentation form.
///
/// Upstream answers are not guaranteed to carry a separable
/// `preference exchange` pair (the first answer may be a CNAME, or an
/// already-resolved address). When the pair cannot be separated the whole
/// first token is treated as the host and the preference is left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxExchange {
    pub preference: Option<u16>,
    pub host: String,
}

impl MxExchange {
    pub fn parse(rdata: &str) -> Self {
        let tokens: Vec<&str> = rdata.split_whitespace().collect();
        if tokens.len() == 2 {
            return Self {
                preference: tokens[0].parse().ok(),
                host: tokens[1].to_string(),
            };
        }
        Self {
            preference: None,
            host: tokens.first().unwrap_or(&"").to_string(),
        }
    }

    /// Whether the exchange host is already a literal IPv4 address.
    ///
    /// Syntactic check only: up to four dot-separated tokens, each an
    /// integer in 0..=255. Not a full IPv4 grammar.
    pub fn is_address(&self) -> bool {
        is_ipv4_literal(&self.host)
    }
}

pub fn is_ipv4_literal(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.splitn(4, '.')
        .all(|octet| matches!(octet.parse::<u32>(), Ok(n) if n <= 255))
}
