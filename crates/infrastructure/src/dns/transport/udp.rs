//! UDP exchange (RFC 1035 §4.2.1): the datagram payload is the query and the
//! reply goes back as a single datagram to the sender.

use super::QueryTransport;
use async_trait::async_trait;
use ferrous_dyndns_application::ports::{Protocol, QueryContext};
use ferrous_dyndns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;

/// Receive buffer size: the largest payload a UDP datagram can carry, so a
/// query is never truncated before decoding.
pub const MAX_UDP_DATAGRAM_SIZE: usize = 65_535;

pub struct UdpExchange {
    socket: Arc<UdpSocket>,
    payload: Option<Vec<u8>>,
    remote: SocketAddr,
}

impl UdpExchange {
    pub fn new(socket: Arc<UdpSocket>, payload: Vec<u8>, remote: SocketAddr) -> Self {
        Self {
            socket,
            payload: Some(payload),
            remote,
        }
    }
}

#[async_trait]
impl QueryTransport for UdpExchange {
    fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    fn protocol(&self) -> Protocol {
        Protocol::Udp
    }

    async fn read_query(&mut self) -> Result<Vec<u8>, DomainError> {
        self.payload
            .take()
            .ok_or_else(|| DomainError::IoError("UDP datagram already consumed".to_string()))
    }

    fn context(&mut self) -> QueryContext<'_> {
        QueryContext::udp(self.remote)
    }

    async fn write_reply(&mut self, reply: &[u8]) -> Result<(), DomainError> {
        self.socket
            .send_to(reply, self.remote)
            .await
            .map_err(|e| {
                DomainError::IoError(format!("Failed to send UDP reply to {}: {}", self.remote, e))
            })?;
        Ok(())
    }
}
