//! One query/reply exchange, independent of the transport it arrived on.

use super::transport::QueryTransport;
use ferrous_dyndns_application::ports::{DnsResolver, Reply};
use ferrous_dyndns_domain::DomainError;
use hickory_proto::op::Message;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct RequestHandler {
    resolver: Arc<dyn DnsResolver>,
    query_timeout: Duration,
    log_queries: bool,
}

impl RequestHandler {
    pub fn new(resolver: Arc<dyn DnsResolver>, query_timeout: Duration, log_queries: bool) -> Self {
        Self {
            resolver,
            query_timeout,
            log_queries,
        }
    }

    /// Read, resolve and answer one query.
    ///
    /// Failures are logged with the client address and end this exchange
    /// only. The transport is closed on every path and a failing close is
    /// ignored.
    pub async fn handle<T: QueryTransport>(&self, mut transport: T) {
        let client = transport.remote_addr();
        let protocol = transport.protocol();

        let outcome = tokio::time::timeout(self.query_timeout, self.exchange(&mut transport))
            .await
            .unwrap_or(Err(DomainError::QueryTimeout));

        if let Err(e) = outcome {
            warn!(client = %client, protocol = %protocol, error = %e, "DNS request failed");
        }

        if let Err(e) = transport.close().await {
            debug!(client = %client, protocol = %protocol, error = %e, "Close failed");
        }
    }

    async fn exchange<T: QueryTransport>(&self, transport: &mut T) -> Result<(), DomainError> {
        let raw = transport.read_query().await?;

        let reply = match Message::from_vec(&raw) {
            Ok(query) => {
                if self.log_queries {
                    self.log_query(&query, transport);
                }
                self.resolver
                    .generate_reply(&query, &raw, transport.context())
                    .await?
            }
            Err(e) => {
                debug!(
                    client = %transport.remote_addr(),
                    protocol = %transport.protocol(),
                    error = %e,
                    len = raw.len(),
                    "Malformed DNS query, answering FORMERR"
                );
                Reply::Answer(self.resolver.formerr_reply(&raw))
            }
        };

        match reply {
            Reply::Answer(bytes) => transport.write_reply(&bytes).await,
            Reply::Drop => {
                debug!(client = %transport.remote_addr(), "Query dropped without reply");
                Ok(())
            }
        }
    }

    fn log_query<T: QueryTransport>(&self, query: &Message, transport: &T) {
        match query.queries().first() {
            Some(question) => info!(
                domain = %question.name(),
                record_type = ?question.query_type(),
                client = %transport.remote_addr(),
                protocol = %transport.protocol(),
                "DNS query received"
            ),
            None => info!(
                client = %transport.remote_addr(),
                protocol = %transport.protocol(),
                "DNS query without question received"
            ),
        }
    }
}
