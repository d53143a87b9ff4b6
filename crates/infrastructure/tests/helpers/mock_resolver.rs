#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_dyndns_application::ports::{DnsResolver, QueryContext, Reply};
use ferrous_dyndns_domain::DomainError;
use hickory_proto::op::Message;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub enum StubBehavior {
    /// Reply with the query bytes, QR bit set.
    Echo,
    Drop,
    Fail,
    Sleep(Duration),
}

pub struct StubResolver {
    behavior: StubBehavior,
    replies: AtomicUsize,
    formerrs: AtomicUsize,
}

impl StubResolver {
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            replies: AtomicUsize::new(0),
            formerrs: AtomicUsize::new(0),
        }
    }

    pub fn replies(&self) -> usize {
        self.replies.load(Ordering::SeqCst)
    }

    pub fn formerrs(&self) -> usize {
        self.formerrs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for StubResolver {
    async fn generate_reply(
        &self,
        _query: &Message,
        raw: &[u8],
        _ctx: QueryContext<'_>,
    ) -> Result<Reply, DomainError> {
        self.replies.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StubBehavior::Echo => {
                let mut reply = raw.to_vec();
                reply[2] |= 0x80;
                Ok(Reply::Answer(reply))
            }
            StubBehavior::Drop => Ok(Reply::Drop),
            StubBehavior::Fail => Err(DomainError::IoError("resolver failure".to_string())),
            StubBehavior::Sleep(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(Reply::Answer(raw.to_vec()))
            }
        }
    }

    fn formerr_reply(&self, raw: &[u8]) -> Vec<u8> {
        self.formerrs.fetch_add(1, Ordering::SeqCst);
        ferrous_dyndns_infrastructure::dns::wire_response::build_formerr_response(raw)
    }
}
