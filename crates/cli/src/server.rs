use hickory_server::server::RequestHandler;
use hickory_server::ServerFuture;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::net::UdpSocket;

const TCP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn serve_dns<H: RequestHandler>(
    bind_addr: SocketAddr,
    tcp_enabled: bool,
    handler: H,
) -> anyhow::Result<()> {
    let domain = if bind_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let mut server = ServerFuture::new(handler);
    server.register_socket(create_udp_socket(domain, bind_addr)?);
    if tcp_enabled {
        server.register_listener(create_tcp_listener(domain, bind_addr)?, TCP_REQUEST_TIMEOUT);
    }

    server.block_until_done().await?;
    Ok(())
}

fn create_udp_socket(domain: Domain, bind_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if bind_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&bind_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, bind_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if bind_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&bind_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
