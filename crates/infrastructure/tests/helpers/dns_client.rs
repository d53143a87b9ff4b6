#![allow(dead_code)]
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};

pub const REPLY_WAIT: Duration = Duration::from_millis(500);

/// Send one datagram and wait briefly for a reply.
pub async fn udp_exchange(server: SocketAddr, query: &[u8]) -> Option<Vec<u8>> {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(query, server).await.unwrap();

    let mut buf = vec![0u8; 65_535];
    match tokio::time::timeout(REPLY_WAIT, socket.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => {
            buf.truncate(len);
            Some(buf)
        }
        _ => None,
    }
}

/// Send a length-prefixed query and read a length-prefixed reply.
pub async fn tcp_exchange(server: SocketAddr, query: &[u8]) -> Option<Vec<u8>> {
    let mut stream = TcpStream::connect(server).await.unwrap();
    stream
        .write_all(&(query.len() as u16).to_be_bytes())
        .await
        .unwrap();
    stream.write_all(query).await.unwrap();

    let mut prefix = [0u8; 2];
    tokio::time::timeout(REPLY_WAIT, stream.read_exact(&mut prefix))
        .await
        .ok()?
        .ok()?;
    let mut reply = vec![0u8; u16::from_be_bytes(prefix) as usize];
    stream.read_exact(&mut reply).await.ok()?;
    Some(reply)
}

/// Write `raw` as-is, half-close, and collect everything the server sends
/// back until it closes the connection.
pub async fn tcp_send_raw(server: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(server).await.unwrap();
    stream.write_all(raw).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut received = Vec::new();
    tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut received))
        .await
        .expect("server did not close the connection")
        .unwrap();
    received
}
