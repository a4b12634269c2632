//! Request signature field tables.
//!
//! The string digested into a request signature is an endpoint-specific
//! concatenation: the game tag and path parameters joined by `/`, then the
//! salt, then any payload and the requester's session key appended by plain
//! adjacency with no separator. The orders below were reconstructed from
//! observed traffic; they are incompatible between families by design, so
//! each family keeps its own explicit function. Do not unify them.

use skysync_protocol::GAME_TAG;

/// Standard GET family (download save, current version, snapshot list,
/// gifts, visits, raffle, player details):
/// `tt/{playerId}/{salt}` + playerSs.
pub fn standard(player_id: &str, salt: u32, player_ss: &str) -> String {
    format!("{GAME_TAG}/{player_id}/{salt}{player_ss}")
}

/// Upload family (push save, push snapshot):
/// `tt/{playerId}/{salt}` + compressedSave + playerSs.
pub fn with_payload(player_id: &str, salt: u32, payload: &str, player_ss: &str) -> String {
    format!("{GAME_TAG}/{player_id}/{salt}{payload}{player_ss}")
}

/// Friend metadata: `tt/{playerId}/{salt}` + friendId + playerSs.
pub fn friend_meta(player_id: &str, salt: u32, friend_id: &str, player_ss: &str) -> String {
    format!("{GAME_TAG}/{player_id}/{salt}{friend_id}{player_ss}")
}

/// Friend reads with the friend in the path (pull tower, friend snapshot
/// list): `tt/{playerId}/{friendId}/{salt}` + playerSs.
pub fn friend_read(player_id: &str, friend_id: &str, salt: u32, player_ss: &str) -> String {
    format!("{GAME_TAG}/{player_id}/{friend_id}/{salt}{player_ss}")
}

/// Snapshot pull: `tt/{playerId}/{snapshotId}/{salt}` + playerSs.
pub fn snapshot_pull(player_id: &str, snapshot_id: u32, salt: u32, player_ss: &str) -> String {
    format!("{GAME_TAG}/{player_id}/{snapshot_id}/{salt}{player_ss}")
}

/// Item send: `tt/{itemType}/{fromId}/{toId}/{salt}` + itemString + fromSs.
pub fn item_send(
    item_type: &str,
    from_id: &str,
    to_id: &str,
    salt: u32,
    item: &str,
    from_ss: &str,
) -> String {
    format!("{GAME_TAG}/{item_type}/{from_id}/{to_id}/{salt}{item}{from_ss}")
}

/// Gift receive: `tt/{playerId}/{giftId}/{salt}` + playerSs.
pub fn gift_receive(player_id: &str, gift_id: &str, salt: u32, player_ss: &str) -> String {
    format!("{GAME_TAG}/{player_id}/{gift_id}/{salt}{player_ss}")
}

/// Email registration (signed with the burn bot's credentials):
/// `tt/{burnBotId}/{salt}` + email + burnBotSs.
pub fn email_register(burn_bot_id: &str, salt: u32, email: &str, burn_bot_ss: &str) -> String {
    format!("{GAME_TAG}/{burn_bot_id}/{salt}{email}{burn_bot_ss}")
}

/// Account registration (no credentials yet): `tt/{salt1}/{salt2}`.
pub fn user_register(salt1: u32, salt2: u32) -> String {
    format!("{GAME_TAG}/{salt1}/{salt2}")
}
