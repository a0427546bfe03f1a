use super::intercept_mx::{InterceptMxUseCase, MxResolution};
use crate::ports::{UpstreamReply, UpstreamResolver};
use geomx_dns_domain::{DnsQuery, DnsRequest, DomainError, RecordType, SkipList};
use std::sync::Arc;
use tracing::debug;

/// A routed reply: either the interception pipeline's outcome or the raw
/// upstream answer for pass-through traffic.
#[derive(Debug)]
pub enum RoutedReply {
    Mx(MxResolution),
    Upstream(UpstreamReply),
}

/// Per-query dispatch. MX queries whose name does not match the skip-list
/// enter the interception pipeline; everything else is proxied to upstream
/// over the client's transport class and relayed verbatim.
pub struct RouteQueryUseCase {
    intercept: Arc<InterceptMxUseCase>,
    upstream: Arc<dyn UpstreamResolver>,
    skip: Arc<SkipList>,
}

impl RouteQueryUseCase {
    pub fn new(
        intercept: Arc<InterceptMxUseCase>,
        upstream: Arc<dyn UpstreamResolver>,
        skip: Arc<SkipList>,
    ) -> Self {
        Self {
            intercept,
            upstream,
            skip,
        }
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<RoutedReply, DomainError> {
        if request.record_type == RecordType::MX {
            if self.skip.matches(&request.domain) {
                debug!(domain = %request.domain, "MX query matches skip-list, proxying");
            } else {
                let resolution = self.intercept.execute(request).await?;
                return Ok(RoutedReply::Mx(resolution));
            }
        }

        let query = DnsQuery::new(request.domain.clone(), request.record_type);
        let reply = self.upstream.forward(&query, request.transport).await?;
        Ok(RoutedReply::Upstream(reply))
    }
}
