use axum::{
    extract::{ConnectInfo, Query, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::get,
    Router,
};
use ferrous_dyndns_application::use_cases::DynDnsUpdateRequest;
use ferrous_dyndns_domain::ReturnCode;
use std::net::SocketAddr;
use tracing::{debug, info, instrument};

use crate::{
    dto::dyndns::UpdateParams,
    errors::ApiError,
    state::AppState,
    utils::{basic_auth_password, remote_address},
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/nic/update", get(update))
}

#[instrument(skip_all, name = "api_dyndns_update")]
async fn update(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(params): Query<UpdateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let request = DynDnsUpdateRequest {
        tokens: basic_auth_password(&headers),
        hostnames: params.hostname,
        myip: params.myip,
        remote_address: remote_address(&headers, state.remote_address_header.as_deref(), peer),
    };

    let codes = state.dyndns_update.execute(&request).await?;

    if codes == [ReturnCode::BadAgent] {
        debug!(remote = %request.remote_address, "DynDNS2 request without token or hostname");
    } else {
        info!(
            remote = %request.remote_address,
            hostnames = request.hostnames.as_deref().unwrap_or_default(),
            results = codes.len(),
            "DynDNS2 update processed"
        );
    }

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        ReturnCode::to_body(&codes),
    ))
}
