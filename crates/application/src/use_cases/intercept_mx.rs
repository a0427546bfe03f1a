use crate::ports::{AnswerCache, CacheKey, GeoLookup, UpstreamReply, UpstreamResolver};
use geomx_dns_domain::{
    DnsQuery, DnsRequest, DomainError, GatewayTable, MxAnswer, MxExchange, RecordType,
    TransportClass,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one MX interception.
#[derive(Debug, Clone)]
pub enum MxResolution {
    /// Served from the answer cache; no upstream or geolocation work done.
    Cached(MxAnswer),
    /// Freshly rewritten against the selected gateway and stored.
    Rewritten(MxAnswer),
    /// Returned exactly as upstream answered it: error status, nothing to
    /// rewrite, or a fail-open fallback after a secondary-resolution
    /// failure.
    Passthrough(UpstreamReply),
}

/// The MX interception pipeline.
///
/// For an MX query not exempted by the skip-list: check the cache, forward
/// upstream, chase the exchange host down to an address if needed, locate
/// it, substitute the gateway for that location and cache the result under
/// the record's own TTL. Every enrichment failure falls back to the
/// unmodified forwarded reply; only a transport failure on the primary
/// forward surfaces as an error.
pub struct InterceptMxUseCase {
    upstream: Arc<dyn UpstreamResolver>,
    geo: Arc<dyn GeoLookup>,
    cache: Arc<dyn AnswerCache>,
    gateways: Arc<GatewayTable>,
}

impl InterceptMxUseCase {
    pub fn new(
        upstream: Arc<dyn UpstreamResolver>,
        geo: Arc<dyn GeoLookup>,
        cache: Arc<dyn AnswerCache>,
        gateways: Arc<GatewayTable>,
    ) -> Self {
        Self {
            upstream,
            geo,
            cache,
            gateways,
        }
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<MxResolution, DomainError> {
        let key = CacheKey::new(&request.domain);

        match self.cache.get(&key).await {
            Ok(Some(answer)) => {
                debug!(domain = %request.domain, "MX answer served from cache");
                return Ok(MxResolution::Cached(answer));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(domain = %request.domain, error = %e, "Cache lookup failed, treating as miss");
            }
        }

        let query = DnsQuery::new(request.domain.clone(), RecordType::MX);
        let reply = self.upstream.forward(&query, request.transport).await?;

        if !reply.status.is_no_error() {
            debug!(domain = %request.domain, status = %reply.status, "Upstream error status passed through");
            return Ok(MxResolution::Passthrough(reply));
        }

        let Some(first) = reply.first_answer.clone() else {
            debug!(domain = %request.domain, "Upstream reply carries no answer, passing through");
            return Ok(MxResolution::Passthrough(reply));
        };

        let exchange = MxExchange::parse(&first.rdata);

        let host = if exchange.is_address() {
            exchange.host.clone()
        } else {
            // Chase the exchange hostname down to an address. The chained
            // query always goes over UDP, regardless of client transport.
            match self.resolve_exchange_address(&exchange.host).await {
                Some(address) => address,
                None => {
                    debug!(
                        domain = %request.domain,
                        exchange = %exchange.host,
                        "Secondary resolution failed, returning forwarded reply unmodified"
                    );
                    return Ok(MxResolution::Passthrough(reply));
                }
            }
        };

        let location = self.geo.locate(&host);
        let gateway = self.gateways.gateway_for(&location);

        debug!(
            domain = %request.domain,
            host = %host,
            location = %location,
            gateway = %gateway,
            "Rewriting MX exchange"
        );

        let answer = MxAnswer::new(
            request.domain.to_string(),
            first.ttl,
            first.class,
            exchange.preference,
            gateway.to_string(),
        );

        if answer.ttl == 0 {
            debug!(domain = %request.domain, "Zero TTL, skipping cache store");
        } else if let Err(e) = self.cache.set(&key, &answer, answer.ttl).await {
            warn!(domain = %request.domain, error = %e, "Failed to store rewritten answer in cache");
        }

        Ok(MxResolution::Rewritten(answer))
    }

    /// Secondary A-record resolution for a non-address exchange host.
    /// Returns `None` on any failure so the caller can fail open.
    async fn resolve_exchange_address(&self, host: &str) -> Option<String> {
        let query = DnsQuery::new(host.to_string(), RecordType::A);
        match self.upstream.forward(&query, TransportClass::Udp).await {
            Ok(reply) if reply.status.is_no_error() => reply
                .first_answer
                .map(|answer| MxExchange::parse(&answer.rdata).host),
            Ok(reply) => {
                debug!(host = %host, status = %reply.status, "Secondary resolution answered with error status");
                None
            }
            Err(e) => {
                warn!(host = %host, error = %e, "Secondary resolution transport failure");
                None
            }
        }
    }
}
