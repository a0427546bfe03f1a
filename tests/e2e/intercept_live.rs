//! Live end-to-end checks against a running geomx-dns intercept proxy.
//!
//! Prerequisites (hence #[ignore]):
//! - `geomx-dns` listening on 127.0.0.1:5300 (`--port 5300`)
//! - its configured upstream resolver reachable
//! - Redis running for the answer cache
//!
//! Run with: `cargo test -p geomx-dns-e2e -- --ignored`

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;
use std::time::Duration;
use tokio::net::UdpSocket;

const PROXY_ADDR: &str = "127.0.0.1:5300";

async fn exchange(domain: &str, record_type: RecordType) -> Message {
    let mut query = Query::new();
    query.set_name(Name::from_str(domain).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(0x4d58, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();

    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(&buf, PROXY_ADDR).await.unwrap();

    let mut recv_buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(10), socket.recv_from(&mut recv_buf))
        .await
        .expect("proxy did not answer in time")
        .unwrap();

    Message::from_vec(&recv_buf[..len]).unwrap()
}

#[tokio::test]
#[ignore]
async fn mx_query_is_answered_with_a_single_gateway_record() {
    let response = exchange("gmail.com.", RecordType::MX).await;

    assert_eq!(response.answer_count(), 1);
    let answer = &response.answers()[0];
    assert_eq!(answer.record_type(), RecordType::MX);

    // the exchange must be one of the configured gateways, not a real MX host
    match answer.data() {
        RData::MX(mx) => {
            let exchange = mx.exchange().to_utf8();
            assert!(
                exchange.starts_with("192.168.200.133") || exchange.starts_with("172.21.175.245"),
                "unexpected exchange {}",
                exchange
            );
        }
        other => panic!("expected MX rdata, got {:?}", other),
    }
}

#[tokio::test]
#[ignore]
async fn repeated_mx_query_returns_the_identical_cached_record() {
    let first = exchange("gmail.com.", RecordType::MX).await;
    let second = exchange("gmail.com.", RecordType::MX).await;

    assert_eq!(first.answers()[0].data(), second.answers()[0].data());
    assert_eq!(first.answers()[0].ttl(), second.answers()[0].ttl());
}

#[tokio::test]
#[ignore]
async fn a_query_passes_through_to_upstream() {
    let response = exchange("example.com.", RecordType::A).await;

    assert!(response.answer_count() >= 1);
    assert!(response
        .answers()
        .iter()
        .all(|record| record.record_type() == RecordType::A));
}
