//! Authoritative resolver answering from the in-memory zone store.

use super::record_type_map::RecordTypeMapper;
use super::wire_response::build_formerr_response;
use crate::zones::{MemoryZoneStore, ZoneLookup};
use async_trait::async_trait;
use ferrous_dyndns_application::ports::{DnsResolver, QueryContext, Reply};
use ferrous_dyndns_domain::{canonical_hostname, DomainError, RecordType, ZoneRecord};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{rdata, Name, RData, Record, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ZoneResolver {
    store: Arc<MemoryZoneStore>,
}

impl ZoneResolver {
    pub fn new(store: Arc<MemoryZoneStore>) -> Self {
        Self { store }
    }

    async fn answer(&self, question: &Query, response: &mut Message) -> ResponseCode {
        let qtype = question.query_type();
        if matches!(qtype, HickoryRecordType::AXFR | HickoryRecordType::IXFR) {
            return ResponseCode::Refused;
        }

        let qname = question.name().to_utf8();
        let records = match self.store.lookup(&qname).await {
            ZoneLookup::OutOfZone => return ResponseCode::Refused,
            ZoneLookup::NxDomain { .. } => {
                response.set_authoritative(true);
                return ResponseCode::NXDomain;
            }
            ZoneLookup::Found { records, .. } => records,
        };

        response.set_authoritative(true);
        for record in select_answers(&records, qtype) {
            match to_rdata(record) {
                Ok(data) => {
                    response.add_answer(Record::from_rdata(
                        question.name().clone(),
                        record.ttl,
                        data,
                    ));
                }
                Err(e) => {
                    warn!(
                        hostname = %record.hostname(),
                        record_type = %record.record_type,
                        error = %e,
                        "Skipping unusable zone record"
                    );
                }
            }
        }

        ResponseCode::NoError
    }
}

#[async_trait]
impl DnsResolver for ZoneResolver {
    async fn generate_reply(
        &self,
        query: &Message,
        _raw: &[u8],
        ctx: QueryContext<'_>,
    ) -> Result<Reply, DomainError> {
        if query.message_type() == MessageType::Response {
            debug!(client = %ctx.client, protocol = %ctx.protocol, "Dropping DNS response sent as query");
            return Ok(Reply::Drop);
        }

        let mut response = Message::new(query.id(), MessageType::Response, query.op_code());
        response.set_recursion_desired(query.recursion_desired());

        let rcode = if query.op_code() != OpCode::Query {
            ResponseCode::NotImp
        } else if query.queries().len() != 1 {
            ResponseCode::FormErr
        } else {
            let question = &query.queries()[0];
            response.add_query(question.clone());
            self.answer(question, &mut response).await
        };
        response.set_response_code(rcode);

        debug!(
            client = %ctx.client,
            protocol = %ctx.protocol,
            rcode = ?rcode,
            answers = response.answers().len(),
            "Reply generated"
        );

        encode(&response).map(Reply::Answer)
    }

    fn formerr_reply(&self, raw: &[u8]) -> Vec<u8> {
        build_formerr_response(raw)
    }
}

/// Records answering `qtype`: every record for ANY, exact type matches
/// otherwise, falling back to a CNAME at the name.
fn select_answers(records: &[ZoneRecord], qtype: HickoryRecordType) -> Vec<&ZoneRecord> {
    if qtype == HickoryRecordType::ANY {
        return records.iter().collect();
    }

    let Some(wanted) = RecordTypeMapper::from_hickory(qtype) else {
        return Vec::new();
    };

    let exact: Vec<&ZoneRecord> = records
        .iter()
        .filter(|r| r.record_type == wanted)
        .collect();
    if !exact.is_empty() || wanted == RecordType::CNAME {
        return exact;
    }

    records
        .iter()
        .filter(|r| r.record_type == RecordType::CNAME)
        .collect()
}

fn to_rdata(record: &ZoneRecord) -> Result<RData, DomainError> {
    let data = match record.record_type {
        RecordType::A => RData::A(rdata::A(parse_value::<Ipv4Addr>(record)?)),
        RecordType::AAAA => RData::AAAA(rdata::AAAA(parse_value::<Ipv6Addr>(record)?)),
        RecordType::CNAME => RData::CNAME(rdata::CNAME(target_name(&record.value, record)?)),
        RecordType::NS => RData::NS(rdata::NS(target_name(&record.value, record)?)),
        RecordType::MX => {
            let mut parts = record.value.split_whitespace();
            let (Some(preference), Some(exchange), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(DomainError::ValidationFailed(format!(
                    "MX value must be '<preference> <exchange>': {}",
                    record.value
                )));
            };
            let preference: u16 = preference.parse().map_err(|_| {
                DomainError::ValidationFailed(format!("Invalid MX preference: {}", preference))
            })?;
            RData::MX(rdata::MX::new(preference, target_name(exchange, record)?))
        }
        RecordType::TXT => RData::TXT(rdata::TXT::new(vec![record.value.clone()])),
    };
    Ok(data)
}

fn parse_value<T: FromStr>(record: &ZoneRecord) -> Result<T, DomainError> {
    record
        .value
        .parse()
        .map_err(|_| DomainError::InvalidIpAddress(record.value.clone()))
}

/// Domain-name rdata: `@`, relative to the zone, or absolute with a trailing dot.
fn target_name(value: &str, record: &ZoneRecord) -> Result<Name, DomainError> {
    let hostname = canonical_hostname(value, &record.zone);
    Name::from_str(&format!("{}.", hostname))
        .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", hostname, e)))
}

fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).map_err(|e| {
        DomainError::InvalidDnsMessage(format!("Failed to serialize DNS reply: {}", e))
    })?;
    Ok(buf)
}
