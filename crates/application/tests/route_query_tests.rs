use geomx_dns_application::use_cases::{
    InterceptMxUseCase, MxResolution, RouteQueryUseCase, RoutedReply,
};
use geomx_dns_domain::{
    DnsRequest, GatewayTable, LocationCode, RecordType, SkipList, TransportClass,
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

mod helpers;
use helpers::{a_reply, mx_reply, MockAnswerCache, MockGeoLookup, MockUpstreamResolver};

struct Fixture {
    upstream: Arc<MockUpstreamResolver>,
    geo: Arc<MockGeoLookup>,
    cache: Arc<MockAnswerCache>,
    router: RouteQueryUseCase,
}

fn fixture(skip: &[&str]) -> Fixture {
    let upstream = Arc::new(MockUpstreamResolver::new());
    let geo = Arc::new(MockGeoLookup::new());
    let cache = Arc::new(MockAnswerCache::new());
    let gateways = Arc::new(GatewayTable::new(
        HashMap::from([(
            LocationCode::new("CN"),
            "192.168.200.133".parse().unwrap(),
        )]),
        "172.21.175.245".parse().unwrap(),
    ));
    let intercept = Arc::new(InterceptMxUseCase::new(
        upstream.clone(),
        geo.clone(),
        cache.clone(),
        gateways,
    ));
    let skip: Vec<String> = skip.iter().map(|s| s.to_string()).collect();
    let router = RouteQueryUseCase::new(
        intercept,
        upstream.clone(),
        Arc::new(SkipList::compile(&skip)),
    );
    Fixture {
        upstream,
        geo,
        cache,
        router,
    }
}

fn request(domain: &str, record_type: RecordType) -> DnsRequest {
    DnsRequest::new(
        domain.to_string(),
        record_type,
        IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7)),
        TransportClass::Udp,
    )
}

#[tokio::test]
async fn non_mx_queries_pass_through_untouched() {
    let f = fixture(&[]);
    let scripted = a_reply("www.example.com", Ipv4Addr::new(93, 184, 216, 34), 3600);
    f.upstream
        .set_reply("www.example.com", RecordType::A, scripted.clone());

    let routed = f
        .router
        .execute(&request("www.example.com", RecordType::A))
        .await
        .unwrap();

    match routed {
        RoutedReply::Upstream(reply) => {
            assert_eq!(reply.status, scripted.status);
            assert_eq!(reply.answers, scripted.answers);
            assert_eq!(reply.authorities, scripted.authorities);
            assert_eq!(reply.additionals, scripted.additionals);
        }
        other => panic!("expected upstream pass-through, got {:?}", other),
    }
    // the interception pipeline was never entered
    assert_eq!(f.cache.get_count(), 0);
    assert_eq!(f.geo.call_count(), 0);
}

#[tokio::test]
async fn skip_listed_mx_queries_never_enter_the_pipeline() {
    let f = fixture(&["*.example.com"]);
    f.upstream.set_reply(
        "mail.example.com",
        RecordType::MX,
        mx_reply("mail.example.com", 10, "mx.example.com", 300),
    );

    let routed = f
        .router
        .execute(&request("mail.example.com", RecordType::MX))
        .await
        .unwrap();

    assert!(matches!(routed, RoutedReply::Upstream(_)));
    // no cache or geo activity at all
    assert_eq!(f.cache.get_count(), 0);
    assert_eq!(f.cache.set_count(), 0);
    assert_eq!(f.geo.call_count(), 0);
    // exactly the one proxied round trip
    assert_eq!(f.upstream.call_count(), 1);
}

#[tokio::test]
async fn mx_queries_not_on_the_skip_list_are_intercepted() {
    let f = fixture(&["*.internal.example.com"]);
    f.upstream.set_reply(
        "mail.example.com",
        RecordType::MX,
        mx_reply("mail.example.com", 10, "203.0.113.9", 300),
    );
    f.geo.set_location("203.0.113.9", LocationCode::new("CN"));

    let routed = f
        .router
        .execute(&request("mail.example.com", RecordType::MX))
        .await
        .unwrap();

    match routed {
        RoutedReply::Mx(MxResolution::Rewritten(answer)) => {
            assert_eq!(answer.exchange, "192.168.200.133");
        }
        other => panic!("expected rewritten MX, got {:?}", other),
    }
}

#[tokio::test]
async fn exotic_record_types_are_proxied() {
    let f = fixture(&[]);
    f.upstream.set_reply(
        "example.com",
        RecordType::Other(257),
        helpers::nodata_reply(),
    );

    let routed = f
        .router
        .execute(&request("example.com", RecordType::Other(257)))
        .await
        .unwrap();

    assert!(matches!(routed, RoutedReply::Upstream(_)));
    assert_eq!(f.cache.get_count(), 0);
}

#[tokio::test]
async fn forward_failure_surfaces_as_error() {
    let f = fixture(&[]);
    f.upstream.set_fail_all(true);

    let result = f.router.execute(&request("www.example.com", RecordType::A)).await;

    assert!(result.is_err());
}
