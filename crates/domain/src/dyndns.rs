//! DynDNS2 update model.
//!
//! A client sends `hostname=a.example.com,b.example.com`, optionally
//! `myip=203.0.113.7,2001:db8::7`, and one or more comma-separated update
//! tokens as the basic-auth password. The server answers with one return
//! code per requested hostname, in request order.

use std::fmt;

use crate::RecordType;

/// Parsed, non-empty update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCredentialSet {
    /// Requested hostnames in request order, duplicates preserved. Interior
    /// empty segments are kept so every comma-separated position gets a line.
    pub hostnames: Vec<String>,
    pub tokens: Vec<String>,
    pub ips: Vec<String>,
}

impl UpdateCredentialSet {
    /// Returns `None` when the token list or the hostname list is missing or
    /// empty; the caller answers `badagent` in that case.
    ///
    /// Without `myip` the detected remote address is the only candidate IP.
    pub fn parse(
        tokens: Option<&str>,
        hostnames: Option<&str>,
        myip: Option<&str>,
        remote_address: &str,
    ) -> Option<Self> {
        let tokens = unique(split_list(tokens?));
        let hostnames = split_positional(hostnames?);
        if tokens.is_empty() || hostnames.is_empty() {
            return None;
        }

        let mut ips = unique(myip.map(split_list).unwrap_or_default());
        if ips.is_empty() {
            ips.push(remote_address.to_string());
        }

        Some(Self {
            hostnames,
            tokens,
            ips,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Splits on commas keeping leading and interior empty segments; trailing
/// empty segments are dropped.
fn split_positional(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = raw.split(',').map(|s| s.trim().to_string()).collect();
    while items.last().is_some_and(|s| s.is_empty()) {
        items.pop();
    }
    items
}

fn unique(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Key used to match requested hostnames against updated records.
pub fn hostname_key(hostname: &str) -> String {
    hostname.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Hostname a record denotes inside its zone.
///
/// `@` is the zone apex, a name ending in `.` is already absolute, anything
/// else is relative to the zone.
pub fn canonical_hostname(record: &str, zone: &str) -> String {
    let domain = zone.strip_suffix('.').unwrap_or(zone);
    if record == "@" {
        return domain.to_string();
    }
    if let Some(absolute) = record.strip_suffix('.') {
        return absolute.to_string();
    }
    format!("{}.{}", record, domain)
}

/// One record changed (or confirmed) by a dynamic update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    pub record: String,
    pub zone: String,
    pub record_type: RecordType,
    pub value: String,
    /// `false` when the record already held `value`
    pub changed: bool,
}

impl UpdateResult {
    pub fn hostname(&self) -> String {
        canonical_hostname(&self.record, &self.zone)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnCode {
    BadAgent,
    NoHost,
    Good(Vec<String>),
    NoChg(Vec<String>),
}

impl ReturnCode {
    /// Response body: one code per line, newline-terminated.
    pub fn to_body(codes: &[ReturnCode]) -> String {
        let mut body = String::new();
        for code in codes {
            body.push_str(&code.to_string());
            body.push('\n');
        }
        body
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnCode::BadAgent => f.write_str("badagent"),
            ReturnCode::NoHost => f.write_str("nohost"),
            ReturnCode::Good(values) => write!(f, "good {}", values.join(",")),
            ReturnCode::NoChg(values) => write!(f, "nochg {}", values.join(",")),
        }
    }
}
