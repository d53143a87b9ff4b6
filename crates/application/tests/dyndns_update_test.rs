mod helpers;

use ferrous_dyndns_application::use_cases::{DynDnsUpdateRequest, DynDnsUpdateUseCase};
use ferrous_dyndns_domain::{DomainError, RecordType, ReturnCode};
use helpers::{MockZoneUpdater, UpdateResultBuilder};
use std::sync::Arc;

const REMOTE: &str = "198.51.100.20";
const ZONE: &str = "example.com.";

fn request(tokens: Option<&str>, hostnames: Option<&str>, myip: Option<&str>) -> DynDnsUpdateRequest {
    DynDnsUpdateRequest {
        tokens: tokens.map(String::from),
        hostnames: hostnames.map(String::from),
        myip: myip.map(String::from),
        remote_address: REMOTE.to_string(),
    }
}

fn make_use_case(updater: Arc<MockZoneUpdater>) -> DynDnsUpdateUseCase {
    DynDnsUpdateUseCase::new(updater)
}

fn good(values: &[&str]) -> ReturnCode {
    ReturnCode::Good(values.iter().map(|v| v.to_string()).collect())
}

fn nochg(values: &[&str]) -> ReturnCode {
    ReturnCode::NoChg(values.iter().map(|v| v.to_string()).collect())
}

// ── preconditions ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_token_returns_badagent_without_updates() {
    let updater = Arc::new(MockZoneUpdater::new());
    let use_case = make_use_case(updater.clone());

    let codes = use_case
        .execute(&request(None, Some("home.example.com"), None))
        .await
        .unwrap();

    assert_eq!(codes, vec![ReturnCode::BadAgent]);
    assert!(updater.calls().is_empty());
}

#[tokio::test]
async fn test_empty_token_returns_badagent_without_updates() {
    let updater = Arc::new(MockZoneUpdater::new());
    let use_case = make_use_case(updater.clone());

    let codes = use_case
        .execute(&request(Some(""), Some("home.example.com"), None))
        .await
        .unwrap();

    assert_eq!(codes, vec![ReturnCode::BadAgent]);
    assert!(updater.calls().is_empty());
}

#[tokio::test]
async fn test_missing_hostname_returns_badagent_without_updates() {
    let updater = Arc::new(MockZoneUpdater::new());
    let use_case = make_use_case(updater.clone());

    for hostnames in [None, Some("")] {
        let codes = use_case
            .execute(&request(Some("secret"), hostnames, None))
            .await
            .unwrap();
        assert_eq!(codes, vec![ReturnCode::BadAgent]);
    }
    assert!(updater.calls().is_empty());
}

// ── candidate IPs and tokens ───────────────────────────────────────────────

#[tokio::test]
async fn test_remote_address_used_when_myip_absent() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_results(
        "secret",
        REMOTE,
        vec![UpdateResultBuilder::a("home", ZONE, REMOTE, true)],
    );
    let use_case = make_use_case(updater.clone());

    let codes = use_case
        .execute(&request(Some("secret"), Some("home.example.com"), None))
        .await
        .unwrap();

    assert_eq!(codes, vec![good(&[REMOTE])]);
    assert_eq!(
        updater.calls(),
        vec![(REMOTE.to_string(), "secret".to_string(), REMOTE.to_string())]
    );
}

#[tokio::test]
async fn test_full_cross_product_of_ips_and_tokens() {
    let updater = Arc::new(MockZoneUpdater::new());
    let use_case = make_use_case(updater.clone());

    use_case
        .execute(&request(
            Some("t1,t2"),
            Some("home.example.com"),
            Some("203.0.113.7,2001:db8::7"),
        ))
        .await
        .unwrap();

    let combos: Vec<(String, String)> = updater
        .calls()
        .into_iter()
        .map(|(remote, token, ip)| {
            assert_eq!(remote, REMOTE);
            (ip, token)
        })
        .collect();

    assert_eq!(
        combos,
        vec![
            ("203.0.113.7".to_string(), "t1".to_string()),
            ("203.0.113.7".to_string(), "t2".to_string()),
            ("2001:db8::7".to_string(), "t1".to_string()),
            ("2001:db8::7".to_string(), "t2".to_string()),
        ]
    );
}

// ── outcomes ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unmatched_hostname_yields_nohost() {
    let updater = Arc::new(MockZoneUpdater::new());
    let use_case = make_use_case(updater);

    let codes = use_case
        .execute(&request(Some("secret"), Some("home.example.com"), Some("203.0.113.7")))
        .await
        .unwrap();

    assert_eq!(codes, vec![ReturnCode::NoHost]);
}

#[tokio::test]
async fn test_unchanged_record_yields_nochg() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_results(
        "secret",
        "203.0.113.7",
        vec![UpdateResultBuilder::a("home", ZONE, "203.0.113.7", false)],
    );
    let use_case = make_use_case(updater);

    let codes = use_case
        .execute(&request(Some("secret"), Some("home.example.com"), Some("203.0.113.7")))
        .await
        .unwrap();

    assert_eq!(codes, vec![nochg(&["203.0.113.7"])]);
}

#[tokio::test]
async fn test_any_changed_record_yields_good_with_values_in_type_order() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_results(
        "v4",
        "203.0.113.7",
        vec![UpdateResultBuilder::a("home", ZONE, "203.0.113.7", false)],
    );
    updater.set_results(
        "v6",
        "2001:db8::7",
        vec![UpdateResultBuilder::aaaa("home", ZONE, "2001:db8::7", true)],
    );
    let use_case = make_use_case(updater);

    let codes = use_case
        .execute(&request(
            Some("v4,v6"),
            Some("home.example.com"),
            Some("203.0.113.7,2001:db8::7"),
        ))
        .await
        .unwrap();

    assert_eq!(codes, vec![good(&["203.0.113.7", "2001:db8::7"])]);
}

#[tokio::test]
async fn test_output_follows_request_order_not_result_order() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_results(
        "secret",
        "203.0.113.7",
        vec![
            UpdateResultBuilder::a("b", ZONE, "203.0.113.7", true),
            UpdateResultBuilder::a("@", ZONE, "203.0.113.7", false),
            UpdateResultBuilder::a("a", ZONE, "203.0.113.7", true),
        ],
    );
    let use_case = make_use_case(updater);

    let codes = use_case
        .execute(&request(
            Some("secret"),
            Some("a.example.com,missing.example.com,example.com,b.example.com"),
            Some("203.0.113.7"),
        ))
        .await
        .unwrap();

    assert_eq!(
        codes,
        vec![
            good(&["203.0.113.7"]),
            ReturnCode::NoHost,
            nochg(&["203.0.113.7"]),
            good(&["203.0.113.7"]),
        ]
    );
}

#[tokio::test]
async fn test_duplicate_hostnames_share_one_slot_and_keep_line_count() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_results(
        "secret",
        "203.0.113.7",
        vec![UpdateResultBuilder::a("home", ZONE, "203.0.113.7", true)],
    );
    let use_case = make_use_case(updater);

    let codes = use_case
        .execute(&request(
            Some("secret"),
            Some("home.example.com,other.example.com,home.example.com"),
            Some("203.0.113.7"),
        ))
        .await
        .unwrap();

    assert_eq!(codes.len(), 3);
    assert_eq!(
        codes,
        vec![
            good(&["203.0.113.7"]),
            ReturnCode::NoHost,
            good(&["203.0.113.7"]),
        ]
    );
}

#[tokio::test]
async fn test_empty_hostname_segment_keeps_its_position() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_results(
        "secret",
        "203.0.113.7",
        vec![
            UpdateResultBuilder::a("a", ZONE, "203.0.113.7", true),
            UpdateResultBuilder::a("b", ZONE, "203.0.113.7", false),
        ],
    );
    let use_case = make_use_case(updater);

    let codes = use_case
        .execute(&request(
            Some("secret"),
            Some("a.example.com,,b.example.com,"),
            Some("203.0.113.7"),
        ))
        .await
        .unwrap();

    assert_eq!(
        codes,
        vec![
            good(&["203.0.113.7"]),
            ReturnCode::NoHost,
            nochg(&["203.0.113.7"]),
        ]
    );
}

#[tokio::test]
async fn test_later_result_of_same_type_overwrites_earlier() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_results(
        "t1",
        "203.0.113.7",
        vec![UpdateResultBuilder::a("home", ZONE, "203.0.113.7", true)],
    );
    updater.set_results(
        "t1",
        "203.0.113.8",
        vec![UpdateResultBuilder::a("home", ZONE, "203.0.113.8", false)],
    );
    let use_case = make_use_case(updater);

    let codes = use_case
        .execute(&request(
            Some("t1"),
            Some("home.example.com"),
            Some("203.0.113.7,203.0.113.8"),
        ))
        .await
        .unwrap();

    assert_eq!(codes, vec![nochg(&["203.0.113.8"])]);
}

#[tokio::test]
async fn test_non_address_records_are_not_reported() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_results(
        "secret",
        "203.0.113.7",
        vec![UpdateResultBuilder::build(
            "home",
            ZONE,
            RecordType::TXT,
            "203.0.113.7",
            true,
        )],
    );
    let use_case = make_use_case(updater);

    let codes = use_case
        .execute(&request(Some("secret"), Some("home.example.com"), Some("203.0.113.7")))
        .await
        .unwrap();

    assert_eq!(codes, vec![ReturnCode::NoHost]);
}

#[tokio::test]
async fn test_absolute_record_name_matches_requested_hostname() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_results(
        "secret",
        "203.0.113.7",
        vec![UpdateResultBuilder::a(
            "vpn.other.org.",
            ZONE,
            "203.0.113.7",
            true,
        )],
    );
    let use_case = make_use_case(updater);

    let codes = use_case
        .execute(&request(Some("secret"), Some("VPN.other.org"), Some("203.0.113.7")))
        .await
        .unwrap();

    assert_eq!(codes, vec![good(&["203.0.113.7"])]);
}

// ── failure handling ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_validation_and_not_found_are_skipped() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_error(
        "secret",
        "not-an-ip",
        DomainError::ValidationFailed("not-an-ip".to_string()),
    );
    updater.set_results(
        "secret",
        "203.0.113.7",
        vec![UpdateResultBuilder::a("home", ZONE, "203.0.113.7", true)],
    );
    let use_case = make_use_case(updater.clone());

    let codes = use_case
        .execute(&request(
            Some("wrong,secret"),
            Some("home.example.com"),
            Some("not-an-ip,203.0.113.7"),
        ))
        .await
        .unwrap();

    assert_eq!(codes, vec![good(&["203.0.113.7"])]);
    assert_eq!(updater.calls().len(), 4);
}

#[tokio::test]
async fn test_unexpected_error_propagates() {
    let updater = Arc::new(MockZoneUpdater::new());
    updater.set_error(
        "secret",
        "203.0.113.7",
        DomainError::IoError("store unavailable".to_string()),
    );
    let use_case = make_use_case(updater);

    let result = use_case
        .execute(&request(Some("secret"), Some("home.example.com"), Some("203.0.113.7")))
        .await;

    assert!(matches!(result, Err(DomainError::IoError(_))));
}
