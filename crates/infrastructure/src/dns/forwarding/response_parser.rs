use geomx_dns_application::ports::{AnswerView, UpstreamReply};
use geomx_dns_domain::{DomainError, RecordClass, ResponseStatus};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{DNSClass, RData, Record};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(
        response_bytes: &[u8],
        protocol_used: &'static str,
    ) -> Result<UpstreamReply, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let status = Self::status_from_rcode(rcode);

        let answers: Vec<Record> = message.answers().to_vec();
        let authorities: Vec<Record> = message.name_servers().to_vec();
        let additionals: Vec<Record> = message.additionals().to_vec();
        let first_answer = answers.first().map(Self::answer_view);

        debug!(
            status = %status,
            answers = answers.len(),
            authority = authorities.len(),
            protocol = protocol_used,
            "DNS response parsed"
        );

        Ok(UpstreamReply {
            status,
            rcode,
            answers,
            authorities,
            additionals,
            first_answer,
            protocol_used,
        })
    }

    /// Presentation-form view of an answer record. MX rdata is rendered as
    /// `preference exchange` with the exchange's root dot trimmed so a
    /// dotted-quad exchange is recognizable as an address literal.
    fn answer_view(record: &Record) -> AnswerView {
        let rdata = match record.data() {
            RData::MX(mx) => {
                let exchange = mx.exchange().to_utf8();
                format!("{} {}", mx.preference(), exchange.trim_end_matches('.'))
            }
            other => other.to_string(),
        };
        AnswerView {
            rdata,
            ttl: record.ttl(),
            class: Self::class_from_hickory(record.dns_class()),
        }
    }

    pub fn status_from_rcode(rcode: ResponseCode) -> ResponseStatus {
        match rcode {
            ResponseCode::NoError => ResponseStatus::NoError,
            ResponseCode::FormErr => ResponseStatus::FormErr,
            ResponseCode::ServFail => ResponseStatus::ServFail,
            ResponseCode::NXDomain => ResponseStatus::NxDomain,
            ResponseCode::NotImp => ResponseStatus::NotImp,
            ResponseCode::Refused => ResponseStatus::Refused,
            other => ResponseStatus::Other(other.low() as u16),
        }
    }

    pub fn class_from_hickory(class: DNSClass) -> RecordClass {
        match class {
            DNSClass::IN => RecordClass::In,
            DNSClass::CH => RecordClass::Ch,
            DNSClass::HS => RecordClass::Hs,
            other => RecordClass::Other(u16::from(other)),
        }
    }
}
