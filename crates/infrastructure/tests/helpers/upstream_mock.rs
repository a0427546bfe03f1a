#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, MX};
use hickory_proto::rr::{Name, RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// What the mock upstream answers with, for every query it receives.
#[derive(Debug, Clone)]
pub enum MockAnswer {
    A(Ipv4Addr),
    Mx { preference: u16, exchange: String },
    Rcode(ResponseCode),
    /// Receive and never answer (timeout path).
    Silent,
}

/// In-process upstream DNS server for transport/forwarder tests, serving
/// one canned answer over UDP and TCP on the same port.
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn start(answer: MockAnswer) -> (Self, SocketAddr) {
        let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = udp.local_addr().unwrap();
        let tcp = TcpListener::bind(addr).await.unwrap();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_answer = answer.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = udp.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { break };
                        if let Some(response) = build_response(&buf[..len], &udp_answer) {
                            let _ = udp.send_to(&response, peer).await;
                        }
                    }
                    result = tcp.accept() => {
                        let Ok((mut stream, _)) = result else { break };
                        let tcp_answer = udp_answer.clone();
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            if let Some(response) = build_response(&query, &tcp_answer) {
                                let _ = stream
                                    .write_all(&(response.len() as u16).to_be_bytes())
                                    .await;
                                let _ = stream.write_all(&response).await;
                            }
                        });
                    }
                }
            }
        });

        (
            Self {
                addr,
                shutdown_tx: Some(shutdown_tx),
            },
            addr,
        )
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_response(query_bytes: &[u8], answer: &MockAnswer) -> Option<Vec<u8>> {
    if matches!(answer, MockAnswer::Silent) {
        return None;
    }

    let query = Message::from_vec(query_bytes).ok()?;
    let question = query.queries().first()?.clone();
    let owner = question.name().clone();

    let mut response = Message::new(query.id(), MessageType::Response, OpCode::Query);
    response.set_recursion_desired(true);
    response.set_recursion_available(true);
    response.add_query(question);

    match answer {
        MockAnswer::A(address) => {
            response.add_answer(Record::from_rdata(owner, 60, RData::A(A(*address))));
        }
        MockAnswer::Mx {
            preference,
            exchange,
        } => {
            let exchange = Name::from_str(exchange).unwrap_or_else(|_| Name::root());
            response.add_answer(Record::from_rdata(
                owner,
                300,
                RData::MX(MX::new(*preference, exchange)),
            ));
        }
        MockAnswer::Rcode(code) => {
            response.set_response_code(*code);
        }
        MockAnswer::Silent => unreachable!(),
    }

    response.to_vec().ok()
}
