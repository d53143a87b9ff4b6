use serde::Deserialize;

/// Query string of a DynDNS2 update request.
///
/// Other parameters sent by common clients (`wildcard`, `mx`, `offline`) are
/// accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateParams {
    pub hostname: Option<String>,
    pub myip: Option<String>,
}
