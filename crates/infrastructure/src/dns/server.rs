use crate::dns::forwarding::RecordTypeMapper;
use geomx_dns_application::ports::UpstreamReply;
use geomx_dns_application::use_cases::{
    MxResolution, RouteQueryUseCase, RoutedReply, SelectZoneUseCase,
};
use geomx_dns_domain::{
    DnsQuery, DnsRequest, MxAnswer, RecordClass, ResponseStatus, TransportClass,
};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::MX;
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_proto::xfer::Protocol;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info};

fn normalize_domain(domain: &str) -> String {
    domain.trim_end_matches('.').to_string()
}

fn transport_class(request: &Request) -> TransportClass {
    match request.protocol() {
        Protocol::Tcp => TransportClass::Tcp,
        _ => TransportClass::Udp,
    }
}

/// Handler for the intercept proxy service: MX queries run through the
/// interception pipeline, everything else is relayed from upstream.
pub struct InterceptServerHandler {
    router: Arc<RouteQueryUseCase>,
}

impl InterceptServerHandler {
    pub fn new(router: Arc<RouteQueryUseCase>) -> Self {
        Self { router }
    }
}

#[async_trait::async_trait]
impl RequestHandler for InterceptServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let domain = normalize_domain(&query.name().to_utf8());
        let record_type = RecordTypeMapper::from_hickory(query.query_type());
        let transport = transport_class(request);
        let client_ip = request.src().ip();

        info!(
            domain = %domain,
            record_type = %record_type,
            client = %client_ip,
            transport = transport.as_str(),
            "DNS query received"
        );

        let dns_request = DnsRequest::new(domain.clone(), record_type, client_ip, transport);

        match self.router.execute(&dns_request).await {
            Ok(RoutedReply::Mx(MxResolution::Cached(answer)))
            | Ok(RoutedReply::Mx(MxResolution::Rewritten(answer))) => {
                send_mx_answer(request, &mut response_handle, &answer).await
            }
            Ok(RoutedReply::Mx(MxResolution::Passthrough(reply)))
            | Ok(RoutedReply::Upstream(reply)) => {
                send_upstream_reply(request, &mut response_handle, &reply).await
            }
            Err(e) => {
                // No synthetic SERVFAIL: a failed upstream forward means the
                // client gets no reply, exactly as if the proxy were absent.
                error!(domain = %domain, error = %e, "Upstream forward failed, dropping query");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

/// Handler for the geo zone resolver service.
pub struct ZoneServerHandler {
    selector: Arc<SelectZoneUseCase>,
}

impl ZoneServerHandler {
    pub fn new(selector: Arc<SelectZoneUseCase>) -> Self {
        Self { selector }
    }
}

#[async_trait::async_trait]
impl RequestHandler for ZoneServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let domain = normalize_domain(&query.name().to_utf8());
        let record_type = RecordTypeMapper::from_hickory(query.query_type());
        let client_ip = request.src().ip();

        info!(domain = %domain, record_type = %record_type, client = %client_ip, "Zone query received");

        let dns_query = DnsQuery::new(domain, record_type);
        let lookup = self.selector.execute(client_ip, &dns_query);

        let mut header = *request.header();
        header.set_response_code(rcode_from_status(lookup.status));

        let builder = MessageResponseBuilder::from_message_request(request);
        let response = builder.build(header, lookup.records.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send zone response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_mx_answer<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    answer: &MxAnswer,
) -> ResponseInfo {
    let owner = Name::from_str(&answer.domain).unwrap_or_else(|_| Name::root());
    let exchange = Name::from_str(&answer.exchange).unwrap_or_else(|_| Name::root());

    let mut record = Record::from_rdata(
        owner,
        answer.ttl,
        RData::MX(MX::new(answer.preference.unwrap_or(0), exchange)),
    );
    record.set_dns_class(class_to_hickory(answer.class));

    debug!(domain = %answer.domain, exchange = %answer.exchange, "Sending rewritten MX answer");

    let mut header = *request.header();
    header.set_recursion_available(true);

    let builder = MessageResponseBuilder::from_message_request(request);
    let answers = [record];
    let response = builder.build(header, answers.iter(), &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send MX response");
            ResponseInfo::from(*request.header())
        }
    }
}

async fn send_upstream_reply<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    reply: &UpstreamReply,
) -> ResponseInfo {
    debug!(
        status = %reply.status,
        answers = reply.answers.len(),
        "Relaying upstream reply"
    );

    let mut header = *request.header();
    header.set_response_code(reply.rcode);
    header.set_recursion_available(true);

    let builder = MessageResponseBuilder::from_message_request(request);
    let response = builder.build(
        header,
        reply.answers.iter(),
        reply.authorities.iter(),
        &[] as &[Record],
        reply.additionals.iter(),
    );

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to relay upstream reply");
            ResponseInfo::from(*request.header())
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = *request.header();
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}

fn rcode_from_status(status: ResponseStatus) -> ResponseCode {
    match status {
        ResponseStatus::NoError => ResponseCode::NoError,
        ResponseStatus::FormErr => ResponseCode::FormErr,
        ResponseStatus::ServFail => ResponseCode::ServFail,
        ResponseStatus::NxDomain => ResponseCode::NXDomain,
        ResponseStatus::NotImp => ResponseCode::NotImp,
        ResponseStatus::Refused => ResponseCode::Refused,
        ResponseStatus::Other(_) => ResponseCode::ServFail,
    }
}

fn class_to_hickory(class: RecordClass) -> DNSClass {
    match class {
        RecordClass::In => DNSClass::IN,
        RecordClass::Ch => DNSClass::CH,
        RecordClass::Hs => DNSClass::HS,
        // answers we mint are Internet-class
        RecordClass::Other(_) => DNSClass::IN,
    }
}
