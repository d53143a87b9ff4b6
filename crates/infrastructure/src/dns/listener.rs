//! UDP and TCP accept loops. Each datagram or connection becomes one
//! request task on the worker pool.

use super::pool::WorkerPool;
use super::request::RequestHandler;
use super::transport::udp::MAX_UDP_DATAGRAM_SIZE;
use super::transport::{TcpExchange, UdpExchange};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const TCP_BACKLOG: i32 = 1024;

pub(crate) fn bind_udp(addr: SocketAddr) -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;
    UdpSocket::from_std(socket.into())
}

pub(crate) fn bind_tcp(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(TCP_BACKLOG)?;
    socket.set_nonblocking(true)?;
    TcpListener::from_std(socket.into())
}

pub(crate) async fn run_udp_listener(
    socket: Arc<UdpSocket>,
    pool: Arc<WorkerPool>,
    handler: Arc<RequestHandler>,
    cancel: CancellationToken,
) {
    let mut recv_buf = vec![0u8; MAX_UDP_DATAGRAM_SIZE];

    loop {
        let (len, remote) = tokio::select! {
            _ = cancel.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => match received {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "UDP receive failed");
                    continue;
                }
            },
        };

        let exchange = UdpExchange::new(Arc::clone(&socket), recv_buf[..len].to_vec(), remote);
        let handler = Arc::clone(&handler);
        if let Err(e) = pool.submit(async move { handler.handle(exchange).await }) {
            warn!(client = %remote, protocol = "UDP", error = %e, "DNS request rejected");
        }
    }

    info!("UDP listener stopped");
}

pub(crate) async fn run_tcp_listener(
    listener: TcpListener,
    pool: Arc<WorkerPool>,
    handler: Arc<RequestHandler>,
    cancel: CancellationToken,
) {
    loop {
        let (stream, remote) = tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "TCP accept failed");
                    continue;
                }
            },
        };

        let exchange = TcpExchange::new(stream, remote);
        let handler = Arc::clone(&handler);
        // A rejected task drops the exchange, which closes the connection.
        if let Err(e) = pool.submit(async move { handler.handle(exchange).await }) {
            warn!(client = %remote, protocol = "TCP", error = %e, "DNS request rejected");
        }
    }

    info!("TCP listener stopped");
}
