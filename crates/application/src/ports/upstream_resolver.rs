use async_trait::async_trait;
use geomx_dns_domain::{DnsQuery, DomainError, RecordClass, ResponseStatus, TransportClass};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::Record;

/// Presentation-form view of the first answer record in an upstream reply.
#[derive(Debug, Clone)]
pub struct AnswerView {
    pub rdata: String,
    pub ttl: u32,
    pub class: RecordClass,
}

/// A parsed upstream response. The raw sections are kept so pass-through
/// replies can be relayed verbatim; `first_answer` is pre-extracted for the
/// interception pipeline.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: ResponseStatus,
    pub rcode: ResponseCode,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
    pub first_answer: Option<AnswerView>,
    pub protocol_used: &'static str,
}

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Send one query to the fixed upstream server over the given transport
    /// class with a fixed timeout. No retries; timeouts and transport
    /// failures surface as errors for the caller's fail-open rules.
    async fn forward(
        &self,
        query: &DnsQuery,
        transport: TransportClass,
    ) -> Result<UpstreamReply, DomainError>;
}
