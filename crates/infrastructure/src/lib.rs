//! Ferrous DynDNS Infrastructure Layer
pub mod dns;
pub mod zones;
