//! TCP exchange (RFC 1035 §4.2.2): one length-prefixed query and one
//! length-prefixed reply per connection.

use super::QueryTransport;
use async_trait::async_trait;
use ferrous_dyndns_application::ports::{Protocol, QueryContext};
use ferrous_dyndns_domain::DomainError;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

pub struct TcpExchange {
    stream: TcpStream,
    remote: SocketAddr,
}

impl TcpExchange {
    pub fn new(stream: TcpStream, remote: SocketAddr) -> Self {
        Self { stream, remote }
    }
}

#[async_trait]
impl QueryTransport for TcpExchange {
    fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    async fn read_query(&mut self) -> Result<Vec<u8>, DomainError> {
        read_with_length_prefix(&mut self.stream).await
    }

    fn context(&mut self) -> QueryContext<'_> {
        QueryContext::tcp(self.remote, Some(&mut self.stream))
    }

    async fn write_reply(&mut self, reply: &[u8]) -> Result<(), DomainError> {
        send_with_length_prefix(&mut self.stream, reply).await
    }

    async fn close(&mut self) -> Result<(), DomainError> {
        self.stream
            .shutdown()
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to close TCP connection: {}", e)))
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        DomainError::InvalidDnsMessage(format!(
            "Reply too large for TCP framing: {} bytes",
            message_bytes.len()
        ))
    })?;

    stream
        .write_all(&length.to_be_bytes())
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write length prefix: {}", e)))?;
    stream
        .write_all(message_bytes)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write DNS message: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to flush stream: {}", e)))?;

    Ok(())
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to read query length: {}", e)))?;

    let query_len = u16::from_be_bytes(len_buf) as usize;

    let mut query = vec![0u8; query_len];
    stream.read_exact(&mut query).await.map_err(|e| {
        DomainError::IoError(format!(
            "Failed to read query body ({} bytes declared): {}",
            query_len, e
        ))
    })?;

    Ok(query)
}
