use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Caller address: the first entry of the trusted header when configured and
/// present, the TCP peer otherwise.
pub fn remote_address(headers: &HeaderMap, trusted_header: Option<&str>, peer: SocketAddr) -> String {
    trusted_header
        .and_then(|name| headers.get(name))
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .unwrap_or_else(|| peer.ip().to_string())
}
