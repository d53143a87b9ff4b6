#![allow(dead_code)]
use ferrous_dyndns_domain::config::{ZoneConfig, ZoneRecordConfig};
use ferrous_dyndns_infrastructure::dns::{DnsServerConfig, WorkerPoolConfig};
use ferrous_dyndns_infrastructure::zones::MemoryZoneStore;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub struct QueryBuilder;

impl QueryBuilder {
    pub fn message(id: u16, name: &str, record_type: RecordType) -> Message {
        let mut query = Query::new();
        query.set_name(Name::from_str(name).unwrap());
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);
        message
    }

    pub fn bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
        Self::encode(&Self::message(id, name, record_type))
    }

    pub fn encode(message: &Message) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).unwrap();
        buf
    }
}

pub struct ZoneBuilder {
    zone: ZoneConfig,
}

impl ZoneBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            zone: ZoneConfig {
                name: name.to_string(),
                records: Vec::new(),
            },
        }
    }

    pub fn record(mut self, name: &str, record_type: &str, value: &str) -> Self {
        self.zone.records.push(ZoneRecordConfig {
            name: name.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
            ttl: None,
            token: None,
        });
        self
    }

    pub fn dynamic(mut self, name: &str, record_type: &str, value: &str, token: &str) -> Self {
        self.zone.records.push(ZoneRecordConfig {
            name: name.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
            ttl: Some(60),
            token: Some(token.to_string()),
        });
        self
    }

    pub fn build(self) -> ZoneConfig {
        self.zone
    }
}

/// `example.com` with a static and a token-updatable host plus apex data.
pub fn example_store() -> Arc<MemoryZoneStore> {
    let zone = ZoneBuilder::new("example.com")
        .record("@", "NS", "ns1")
        .record("@", "MX", "10 mail")
        .record("ns1", "A", "192.0.2.53")
        .record("www", "A", "192.0.2.10")
        .record("www", "AAAA", "2001:db8::10")
        .record("alias", "CNAME", "www")
        .record("@", "TXT", "v=spf1 -all")
        .record("host.sub", "A", "192.0.2.20")
        .dynamic("home", "A", "192.0.2.1", "secret")
        .dynamic("home", "AAAA", "2001:db8::1", "secret")
        .build();

    Arc::new(MemoryZoneStore::from_config(&[zone], 300).unwrap())
}

pub fn server_config() -> DnsServerConfig {
    DnsServerConfig {
        udp_addr: Some("127.0.0.1:0".parse().unwrap()),
        tcp_addr: Some("127.0.0.1:0".parse().unwrap()),
        pool: WorkerPoolConfig {
            min_workers: 2,
            max_workers: 4,
            idle_timeout: Duration::from_secs(60),
            backlog: 16,
        },
        query_timeout: Duration::from_secs(2),
        log_queries: true,
        shutdown_grace_period: Duration::from_secs(1),
    }
}
