//! Server-side transports: one value per received query, owning whatever is
//! needed to read that query and write its reply.

pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use ferrous_dyndns_application::ports::{Protocol, QueryContext};
use ferrous_dyndns_domain::DomainError;
use std::net::SocketAddr;

pub use tcp::TcpExchange;
pub use udp::UdpExchange;

#[async_trait]
pub trait QueryTransport: Send {
    fn remote_addr(&self) -> SocketAddr;

    fn protocol(&self) -> Protocol;

    /// Raw query bytes, without transport framing.
    async fn read_query(&mut self) -> Result<Vec<u8>, DomainError>;

    /// Context handed to the resolver for this exchange.
    fn context(&mut self) -> QueryContext<'_>;

    /// Send one reply, adding transport framing.
    async fn write_reply(&mut self, reply: &[u8]) -> Result<(), DomainError>;

    async fn close(&mut self) -> Result<(), DomainError> {
        Ok(())
    }
}
