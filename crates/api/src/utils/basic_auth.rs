use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine};

/// Password part of an `Authorization: Basic` header.
///
/// Everything after the first `:` is the password, so it may itself contain
/// colons. A missing, non-basic or undecodable header yields `None`.
pub fn basic_auth_password(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (_user, password) = credentials.split_once(':')?;
    Some(password.to_string())
}
