use async_trait::async_trait;
use ferrous_dyndns_domain::DomainError;
use hickory_proto::op::Message;
use std::fmt;
use std::net::SocketAddr;
use tokio::net::TcpStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Udp => "UDP",
            Protocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport context handed to the resolver together with the decoded query.
pub struct QueryContext<'a> {
    pub client: SocketAddr,
    pub protocol: Protocol,
    /// Live TCP connection, for resolvers that stream multi-message answers
    /// themselves. Always `None` for UDP.
    pub connection: Option<&'a mut TcpStream>,
}

impl<'a> QueryContext<'a> {
    pub fn udp(client: SocketAddr) -> Self {
        Self {
            client,
            protocol: Protocol::Udp,
            connection: None,
        }
    }

    pub fn tcp(client: SocketAddr, connection: Option<&'a mut TcpStream>) -> Self {
        Self {
            client,
            protocol: Protocol::Tcp,
            connection,
        }
    }
}

/// Outcome of reply generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Wire-format response to send back to the client.
    Answer(Vec<u8>),
    /// Send nothing. Used for inputs that must not be answered at all.
    Drop,
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Build the reply for a successfully decoded query.
    async fn generate_reply(
        &self,
        query: &Message,
        raw: &[u8],
        ctx: QueryContext<'_>,
    ) -> Result<Reply, DomainError>;

    /// FORMERR response for bytes that could not be decoded as a DNS message.
    fn formerr_reply(&self, raw: &[u8]) -> Vec<u8>;
}
