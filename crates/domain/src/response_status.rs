use std::fmt;

/// DNS response status (RCODE) as the pipeline sees it. Only the outcome
/// classification matters here; the wire-level code travels with the reply
/// for verbatim relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseStatus {
    pub fn is_no_error(&self) -> bool {
        matches!(self, ResponseStatus::NoError)
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            0 => ResponseStatus::NoError,
            1 => ResponseStatus::FormErr,
            2 => ResponseStatus::ServFail,
            3 => ResponseStatus::NxDomain,
            4 => ResponseStatus::NotImp,
            5 => ResponseStatus::Refused,
            other => ResponseStatus::Other(other),
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::NoError => write!(f, "NOERROR"),
            ResponseStatus::FormErr => write!(f, "FORMERR"),
            ResponseStatus::ServFail => write!(f, "SERVFAIL"),
            ResponseStatus::NxDomain => write!(f, "NXDOMAIN"),
            ResponseStatus::NotImp => write!(f, "NOTIMP"),
            ResponseStatus::Refused => write!(f, "REFUSED"),
            ResponseStatus::Other(code) => write!(f, "RCODE{}", code),
        }
    }
}
