//! End-to-end endpoint flows against a scripted transport.
//!
//! Each test scripts the JSON the server would return and checks the full
//! call path: signed URL construction, response disposition, validation
//! hash checking, and save decompression.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::{json, Value};
use skysync::auth::{fields, md5_hex, validate, FixedSalt};
use skysync::codec::compress_save;
use skysync::protocol::{Negative, SyncError, SyncOutcome};
use skysync::{BurnBot, SyncClient, SyncConfig, Transport, TransportError, TransportRequest};

const PLAYER_ID: &str = "BPQSY";
const FRIEND_ID: &str = "9GV59";
const PLAYER_SS: &str = "ba6ef101-df65-485f-a01c-669e5d185c0f";
const SECRET: &str = "secret-salt";
const SALT: u32 = 123_456_789;
const SAVE_BLOCKS: &str =
    "[Pc]44745[Pc][Pver]3.14.0[Pver][Pdrmn][h]2[h][Pdrmn][Pfrns]11111[Pfrns]";

/// Scripted transport: pops canned responses, records every request.
#[derive(Default)]
struct MockTransport {
    responses: RefCell<VecDeque<Value>>,
    requests: RefCell<Vec<TransportRequest>>,
}

impl MockTransport {
    fn scripted(responses: Vec<Value>) -> Rc<Self> {
        Rc::new(Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        })
    }

    fn request(&self, index: usize) -> TransportRequest {
        self.requests.borrow()[index].clone()
    }

    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: TransportRequest) -> Result<Value, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| TransportError("no scripted response left".into()))
    }
}

fn direct_config() -> SyncConfig {
    let mut config = SyncConfig::for_player(PLAYER_ID, Some(PLAYER_SS.into()), None);
    config.secret_salt = Some(SECRET.into());
    config
}

fn client(
    config: SyncConfig,
    responses: Vec<Value>,
) -> (SyncClient<Rc<MockTransport>>, Rc<MockTransport>) {
    let transport = MockTransport::scripted(responses);
    let client = SyncClient::new(config, Rc::clone(&transport))
        .expect("config is valid")
        .with_salt_source(Box::new(FixedSalt(SALT)));
    (client, transport)
}

/// The hash a direct-mode server response must carry.
fn signed(input: String) -> String {
    md5_hex(&format!("{input}{SECRET}"))
}

#[test]
fn download_save_validates_and_decompresses() {
    let compressed = compress_save(SAVE_BLOCKS).unwrap();
    let hash = signed(validate::pull_save_input(
        PLAYER_ID, SALT, 7, &compressed, PLAYER_SS,
    ));
    let (client, transport) = client(
        direct_config(),
        vec![json!({ "success": "Found", "id": 7, "h": hash, "data": compressed })],
    );

    let outcome = client.download_save().unwrap();
    let save = outcome.success().expect("positive outcome");
    assert_eq!(save.version, 7);
    assert_eq!(save.blocks, SAVE_BLOCKS);

    // The request path carries the salt and the completed signature.
    let request = transport.request(0);
    let expected_signature = signed(fields::standard(PLAYER_ID, SALT, PLAYER_SS));
    assert_eq!(
        request.url,
        format!("https://sync.nimblebit.com/sync/pull/tt/{PLAYER_ID}/{SALT}/{expected_signature}")
    );
}

#[test]
fn tampered_payload_fails_validation() {
    let compressed = compress_save(SAVE_BLOCKS).unwrap();
    let hash = signed(validate::pull_save_input(
        PLAYER_ID, SALT, 7, &compressed, PLAYER_SS,
    ));
    // Server (or a man in the middle) swaps the payload after signing.
    let tampered = compress_save("[Pc]99999999[Pc]").unwrap();
    let (client, _) = client(
        direct_config(),
        vec![json!({ "success": "Found", "id": 7, "h": hash, "data": tampered })],
    );

    let err = client.download_save().unwrap_err();
    assert!(matches!(err, SyncError::ValidationFailure { .. }));
}

#[test]
fn negative_results_are_outcomes_not_errors() {
    let (client, _) = client(direct_config(), vec![json!({ "success": "NotFound" })]);
    let outcome = client.download_save().unwrap();
    assert_eq!(outcome, SyncOutcome::Negative(Negative::NotFound));
}

#[test]
fn server_errors_pass_through_verbatim() {
    let (client, _) = client(direct_config(), vec![json!({ "error": "bad auth" })]);
    match client.download_save().unwrap_err() {
        SyncError::Server(message) => assert_eq!(message, "bad auth"),
        other => panic!("expected server error, got {other:?}"),
    }
}

#[test]
fn unrecognized_shapes_are_malformed_responses() {
    let (client, _) = client(direct_config(), vec![json!({ "weird": true })]);
    assert!(matches!(
        client.download_save().unwrap_err(),
        SyncError::MalformedResponse(_)
    ));
}

#[test]
fn unauthenticated_calls_fail_before_the_network() {
    let mut config = SyncConfig::for_player(PLAYER_ID, None, Some("p@example.com".into()));
    config.secret_salt = Some(SECRET.into());
    let (client, transport) = client(config, vec![]);

    assert!(matches!(
        client.download_save().unwrap_err(),
        SyncError::NotAuthenticated
    ));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn invalid_friend_id_fails_before_the_network() {
    let (client, transport) = client(direct_config(), vec![]);
    assert!(matches!(
        client.pull_friend_tower("not a player id").unwrap_err(),
        SyncError::InvalidInput { .. }
    ));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn check_for_newer_save_verifies_the_version_hash() {
    let hash = signed(validate::current_version_input(PLAYER_ID, SALT, 12, PLAYER_SS));
    let (client, _) = client(
        direct_config(),
        vec![json!({ "success": "Found", "id": 12, "h": hash })],
    );
    assert_eq!(
        client.check_for_newer_save().unwrap(),
        SyncOutcome::Success(12)
    );
}

#[test]
fn upload_save_posts_metadata_and_signs_the_payload() {
    let (client, transport) = client(
        direct_config(),
        vec![json!({ "success": "Saved", "id": "8", "h": "server-hash" })],
    );

    let receipt = client
        .upload_save(SAVE_BLOCKS, 8, &Default::default())
        .unwrap()
        .success()
        .expect("positive outcome");
    assert_eq!(receipt.id, "8");

    let request = transport.request(0);
    let form = request.form.expect("push posts a form");
    let compressed = form["saveData"].as_str().unwrap().to_string();
    assert_eq!(
        skysync::codec::decompress_save(&compressed).unwrap(),
        SAVE_BLOCKS
    );
    assert_eq!(form["avatar"], "[Pdrmn][h]2[h][Pdrmn]");
    assert_eq!(form["saveVersion"], 8);

    // The signature covers the compressed payload.
    let expected_signature = signed(fields::with_payload(
        PLAYER_ID, SALT, &compressed, PLAYER_SS,
    ));
    assert!(request.url.contains("/sync/push/tt/"));
    assert!(request.url.ends_with(&format!("/{expected_signature}")));
}

#[test]
fn pull_friend_tower_uses_the_friend_field_orders() {
    let compressed = compress_save(SAVE_BLOCKS).unwrap();
    let hash = signed(validate::friend_tower_input(
        PLAYER_ID, FRIEND_ID, SALT, 3, &compressed, PLAYER_SS,
    ));
    let (client, transport) = client(
        direct_config(),
        vec![json!({
            "success": "Found",
            "id": 3,
            "h": hash,
            "data": compressed,
            "player_id": FRIEND_ID,
        })],
    );

    let save = client
        .pull_friend_tower(FRIEND_ID)
        .unwrap()
        .success()
        .expect("positive outcome");
    assert_eq!(save.version, 3);

    let request = transport.request(0);
    let expected_signature = signed(fields::friend_read(PLAYER_ID, FRIEND_ID, SALT, PLAYER_SS));
    assert_eq!(
        request.url,
        format!(
            "https://sync.nimblebit.com/friend/pull_game/tt/{PLAYER_ID}/{FRIEND_ID}/{SALT}/{expected_signature}"
        )
    );
}

#[test]
fn unauthenticated_friend_reads_sign_with_the_burn_bot() {
    let mut config = SyncConfig::for_player(PLAYER_ID, None, Some("p@example.com".into()));
    config.secret_salt = Some(SECRET.into());
    config.burn_bot = Some(BurnBot {
        player_id: "BURN1".into(),
        player_ss: "burn-key".into(),
    });
    let (client, transport) = client(config, vec![json!({ "success": "NotFound" })]);

    let outcome = client.pull_friend_meta(FRIEND_ID).unwrap();
    assert_eq!(outcome, SyncOutcome::Negative(Negative::NotFound));

    let request = transport.request(0);
    let expected_signature = signed(fields::friend_meta("BURN1", SALT, FRIEND_ID, "burn-key"));
    assert!(request.url.contains("/friend/pull_meta/tt/BURN1/"));
    assert!(request.url.ends_with(&format!("/{expected_signature}")));
}

#[test]
fn proxied_sessions_use_the_proxy_hash_for_validation() {
    let mut config = SyncConfig::for_player(PLAYER_ID, Some(PLAYER_SS.into()), None);
    config.proxy.enabled = true;
    config.proxy.address = Some("https://authproxy.example".into());
    config.proxy.api_key = Some("proxy-token".into());

    let compressed = compress_save(SAVE_BLOCKS).unwrap();
    // In proxied mode the proxy recomputes the hash; the client only
    // compares it against the server's.
    let server_hash = "2b00042f7481c7b056c4b410d28f33cf";
    let (client, transport) = client(
        config,
        vec![json!({
            "success": "Found",
            "id": 7,
            "h": server_hash,
            "data": compressed,
            "proxiedHash": server_hash,
        })],
    );

    let save = client
        .download_save()
        .unwrap()
        .success()
        .expect("positive outcome");
    assert_eq!(save.blocks, SAVE_BLOCKS);

    // The raw, uncompleted hash input travels to the proxy as a query
    // parameter along with the target endpoint.
    let request = transport.request(0);
    assert_eq!(request.url, "https://authproxy.example");
    let hash_query = request
        .query
        .iter()
        .find(|(k, _)| k == "hash")
        .map(|(_, v)| v.clone())
        .expect("hash query param");
    assert_eq!(hash_query, fields::standard(PLAYER_ID, SALT, PLAYER_SS));
    assert!(request
        .query
        .iter()
        .any(|(k, v)| k == "endpoint" && v == &format!("/sync/pull/tt/{PLAYER_ID}/{SALT}")));
    assert!(request
        .headers
        .iter()
        .any(|(k, v)| k == "Authorization" && v == "Bearer proxy-token"));
}

#[test]
fn proxied_responses_without_a_proxy_hash_are_malformed() {
    let mut config = SyncConfig::for_player(PLAYER_ID, Some(PLAYER_SS.into()), None);
    config.proxy.enabled = true;
    config.proxy.address = Some("https://authproxy.example".into());

    let compressed = compress_save(SAVE_BLOCKS).unwrap();
    let (client, _) = client(
        config,
        vec![json!({ "success": "Found", "id": 7, "h": "abc", "data": compressed })],
    );
    assert!(matches!(
        client.download_save().unwrap_err(),
        SyncError::MalformedResponse(_)
    ));
}

#[test]
fn visit_player_sends_the_doorman_as_a_visit_item() {
    let compressed = compress_save(SAVE_BLOCKS).unwrap();
    let pull_hash = signed(validate::pull_save_input(
        PLAYER_ID, SALT, 2, &compressed, PLAYER_SS,
    ));
    let (client, transport) = client(
        direct_config(),
        vec![
            json!({ "success": "Found", "id": 2, "h": pull_hash, "data": compressed }),
            json!({ "success": "Sent" }),
        ],
    );

    let outcome = client.visit_player(FRIEND_ID).unwrap();
    assert_eq!(outcome, SyncOutcome::Success(()));

    let send = transport.request(1);
    assert!(send
        .url
        .contains(&format!("/send_item/tt/Visit/{PLAYER_ID}/{FRIEND_ID}/{SALT}/")));
    assert_eq!(
        send.form.expect("send_item posts a form")["itemStr"],
        "[Pdrmn][h]2[h][Pdrmn]"
    );
}

#[test]
fn add_friend_round_trips_the_save_with_the_friend_appended() {
    let compressed = compress_save(SAVE_BLOCKS).unwrap();
    let version_hash = signed(validate::current_version_input(PLAYER_ID, SALT, 5, PLAYER_SS));
    let pull_hash = signed(validate::pull_save_input(
        PLAYER_ID, SALT, 5, &compressed, PLAYER_SS,
    ));
    let (client, transport) = client(
        direct_config(),
        vec![
            json!({ "success": "Found", "id": 5, "h": version_hash }),
            json!({ "success": "Found", "id": 5, "h": pull_hash, "data": compressed }),
            json!({ "success": "Saved", "id": "6", "h": "x" }),
        ],
    );

    let receipt = client
        .add_friend(FRIEND_ID)
        .unwrap()
        .success()
        .expect("positive outcome");
    assert_eq!(receipt.id, "6");

    let push = transport.request(2);
    let uploaded = push.form.expect("push posts a form")["saveData"]
        .as_str()
        .unwrap()
        .to_string();
    let blocks = skysync::codec::decompress_save(&uploaded).unwrap();
    assert!(blocks.contains(&format!("[Pfrns]11111|{FRIEND_ID}[Pfrns]")));
}

#[test]
fn raffle_entry_distinguishes_entered_from_not_entered() {
    let (client, _) = client(
        direct_config(),
        vec![
            json!({ "success": "Entered" }),
            json!({ "success": "NotEntered" }),
        ],
    );
    assert!(client.check_entered_raffle().unwrap());
    assert!(!client.check_entered_raffle().unwrap());
}
