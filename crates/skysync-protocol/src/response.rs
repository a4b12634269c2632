//! Response envelope and typed payloads.
//!
//! Every sync response is JSON carrying either an `error` string or a
//! `success` literal plus operation-specific fields. Recognized negative
//! literals are typed outcomes the caller branches on; anything else that
//! is neither the expected positive literal nor an error is a bad server
//! response.

use serde::Deserialize;

use crate::error::SyncError;

/// The common fields of every sync response.
///
/// `proxied_hash` is only present when the request went through the signing
/// proxy: the proxy recomputes the validation hash (it holds the shared
/// secret) and the client compares that value against the server's instead
/// of recomputing locally.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Envelope {
    pub success: Option<String>,
    pub error: Option<String>,
    #[serde(rename = "proxiedHash")]
    pub proxied_hash: Option<String>,
}

impl Envelope {
    /// Parse the envelope fields out of a raw response.
    pub fn from_value(value: &serde_json::Value) -> Result<Envelope, SyncError> {
        serde_json::from_value(value.clone())
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))
    }
}

/// Recognized negative `success` literals. These are expected application
/// flow (for example "no cloud save yet"), not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negative {
    NotFound,
    NotSaved,
    NotEntered,
    NotSent,
    NotReceived,
}

impl Negative {
    /// Map a `success` literal to its negative outcome, if it is one.
    pub fn from_literal(literal: &str) -> Option<Negative> {
        match literal {
            "NotFound" => Some(Negative::NotFound),
            "NotSaved" => Some(Negative::NotSaved),
            "NotEntered" => Some(Negative::NotEntered),
            "NotSent" => Some(Negative::NotSent),
            "NotReceived" => Some(Negative::NotReceived),
            _ => None,
        }
    }
}

/// Outcome of a sync operation that completed without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome<T> {
    /// The positive literal arrived and the payload decoded.
    Success(T),
    /// A recognized negative literal arrived.
    Negative(Negative),
}

impl<T> SyncOutcome<T> {
    /// The success payload, if any.
    pub fn success(self) -> Option<T> {
        match self {
            SyncOutcome::Success(value) => Some(value),
            SyncOutcome::Negative(_) => None,
        }
    }

    /// Map the success payload, preserving negatives.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SyncOutcome<U> {
        match self {
            SyncOutcome::Success(value) => SyncOutcome::Success(f(value)),
            SyncOutcome::Negative(negative) => SyncOutcome::Negative(negative),
        }
    }
}

/// Disposition of a response against one expected positive literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Positive,
    Negative(Negative),
}

/// Classify a raw response against the positive literal `expected`.
///
/// - an `error` field is a [`SyncError::Server`], message verbatim;
/// - `success == expected` is positive;
/// - a recognized negative literal is negative;
/// - anything else is a [`SyncError::MalformedResponse`].
pub fn classify(value: &serde_json::Value, expected: &str) -> Result<Disposition, SyncError> {
    let envelope = Envelope::from_value(value)?;
    if let Some(message) = envelope.error {
        return Err(SyncError::Server(message));
    }
    match envelope.success.as_deref() {
        Some(literal) if literal == expected => Ok(Disposition::Positive),
        Some(literal) => match Negative::from_literal(literal) {
            Some(negative) => Ok(Disposition::Negative(negative)),
            None => Err(SyncError::MalformedResponse(format!(
                "unexpected success literal `{literal}`"
            ))),
        },
        None => Err(SyncError::MalformedResponse(
            "response carries neither success nor error".into(),
        )),
    }
}

/// Decode the operation-specific payload fields of a positive response.
pub fn payload<T: serde::de::DeserializeOwned>(value: &serde_json::Value) -> Result<T, SyncError> {
    serde_json::from_value(value.clone()).map_err(|e| SyncError::MalformedResponse(e.to_string()))
}

/// Player profile metadata attached to saves and snapshots.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerMeta {
    /// Number of stories, counted as on the elevator shaft.
    pub level: u32,
    /// Doorman bitizen shown as the player's avatar, in block form.
    pub avatar: String,
    /// All-time golden ticket count.
    pub mg: i64,
    /// Floor id the player is requesting bitizens for, or -1.
    #[serde(rename = "reqFID", default = "default_req_fid")]
    pub req_fid: i32,
    /// Latest bitbook post, if any.
    #[serde(default)]
    pub bb: Option<String>,
    #[serde(default)]
    pub ts: Option<i64>,
    /// Whether the player is VIP.
    #[serde(default)]
    pub vip: bool,
}

fn default_req_fid() -> i32 {
    -1
}

/// `current_version` payload: the cloud save's version and validation hash.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CurrentVersion {
    /// Save version; versions start at 0 and increment by 1.
    pub id: u32,
    /// Server validation hash over the response fields.
    pub h: String,
}

/// `pull` payload: a compressed cloud save.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DownloadedSave {
    pub id: u32,
    pub h: String,
    /// Compressed save data (base64 deflate).
    pub data: String,
}

/// `push` receipt.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UploadReceipt {
    /// Version the data was saved as.
    pub id: String,
    /// Hash of the saved data.
    pub h: String,
}

/// One snapshot in a snapshot list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SnapshotEntry {
    /// Save version this snapshot was taken from.
    pub id: u32,
    /// Creation time.
    pub created: i64,
    /// Player metadata at snapshot time.
    pub meta: PlayerMeta,
}

/// `current_snapshots` payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SnapshotList {
    pub saves: Vec<SnapshotEntry>,
}

/// `pull_snapshot` payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PulledSnapshot {
    pub id: u32,
    pub h: String,
    pub data: String,
    #[serde(default)]
    pub c: Option<i64>,
}

/// `friend/pull_meta` payload: friend id → profile metadata.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FriendMeta {
    pub meta: std::collections::BTreeMap<String, PlayerMeta>,
}

/// `friend/pull_game` payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FriendTower {
    pub id: u32,
    pub h: String,
    pub data: String,
    /// Which friend this cloud save belongs to.
    pub player_id: String,
}

/// One gift waiting for the player.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Gift {
    pub gift_id: String,
    /// Item payload in block form, when present.
    #[serde(default)]
    pub item: Option<String>,
    /// Sender's player id, when present.
    #[serde(default)]
    pub from: Option<String>,
    /// Sync item type literal (Play, Gift, Cloud, Raffle, Visit).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// `get_gifts` / `get_visits` payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Visits {
    #[serde(default)]
    pub gifts: Vec<Gift>,
    pub total: u32,
}

/// `register` payload: fresh account credentials.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewUser {
    pub player_id: String,
    pub player_email: String,
}

/// `verify_device` payload: the authenticated session credentials.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VerifiedDevice {
    pub player_id: String,
    pub player_ss: String,
    pub player_email: String,
    #[serde(default)]
    pub player_photo: Option<String>,
    #[serde(default)]
    pub player_nickname: Option<String>,
}

/// `player_details` payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerDetails {
    pub player: PlayerRecord,
}

/// The account record inside a `player_details` response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerRecord {
    pub email: String,
    pub player_id: String,
    pub registered: bool,
    pub blacklisted: bool,
}

/// Static raffle feed record.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RaffleDetails {
    pub id: String,
    pub players: String,
    pub winners: String,
    #[serde(rename = "raffleEnd")]
    pub raffle_end: i64,
}

/// Static bitbook feed record.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BitbookFeedPost {
    pub tid: i64,
    pub text: String,
    pub mediatype: i64,
    pub mediapath: String,
    #[serde(rename = "mediapath-ios", default)]
    pub mediapath_ios: Option<String>,
    #[serde(rename = "mediapath-android", default)]
    pub mediapath_android: Option<String>,
}
