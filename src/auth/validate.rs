//! Response validation hash tables.
//!
//! Servers attach a hash (`h`) to payload-bearing responses, computed over
//! response fields plus the requester's session key and the shared secret.
//! The client independently recomputes that hash and rejects the response
//! on mismatch. Field orders differ per endpoint family and are kept as
//! separate explicit functions, like the request tables in
//! [`super::fields`]. Each function builds the *input* string; the secret
//! is appended by the session's [`super::signer::Signer`], which is also
//! what allows proxied sessions to substitute the proxy-computed hash.

use skysync_protocol::SyncError;

/// `current_version`: playerId + salt + id + playerSs.
pub fn current_version_input(player_id: &str, salt: u32, save_version: u32, player_ss: &str) -> String {
    format!("{player_id}{salt}{save_version}{player_ss}")
}

/// `pull`: playerId + salt + id + data + playerSs.
pub fn pull_save_input(
    player_id: &str,
    salt: u32,
    save_version: u32,
    save_data: &str,
    player_ss: &str,
) -> String {
    format!("{player_id}{salt}{save_version}{save_data}{player_ss}")
}

/// `pull_snapshot`: playerId + salt + id + data + playerSs. Same order as
/// [`pull_save_input`] today, kept separate because the families have
/// drifted before and nothing guarantees they stay aligned.
pub fn pull_snapshot_input(
    player_id: &str,
    salt: u32,
    save_version: u32,
    save_data: &str,
    player_ss: &str,
) -> String {
    format!("{player_id}{salt}{save_version}{save_data}{player_ss}")
}

/// `friend/pull_game`: playerId + friendId + salt + id + data + playerSs.
/// The friend id slots in *before* the salt here, unlike the request hash.
pub fn friend_tower_input(
    player_id: &str,
    friend_id: &str,
    salt: u32,
    save_version: u32,
    save_data: &str,
    player_ss: &str,
) -> String {
    format!("{player_id}{friend_id}{salt}{save_version}{save_data}{player_ss}")
}

/// Compare the server's hash against the expected value. A mismatch is
/// fatal to the call: the data may be corrupted in transit or tampered
/// with, so it must never be silently accepted.
pub fn confirm(
    operation: &'static str,
    server_hash: &str,
    expected: &str,
) -> Result<(), SyncError> {
    if server_hash == expected {
        tracing::debug!(operation, "hash verification passed");
        Ok(())
    } else {
        tracing::warn!(operation, "hash verification failed");
        Err(SyncError::ValidationFailure { operation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::signer::{DirectSigner, Signer};

    #[test]
    fn current_version_input_field_order() {
        assert_eq!(
            current_version_input("BPQSY", 42, 7, "key"),
            "BPQSY427key"
        );
    }

    #[test]
    fn friend_tower_input_places_friend_before_salt() {
        assert_eq!(
            friend_tower_input("BPQSY", "9GV59", 42, 7, "DATA", "key"),
            "BPQSY9GV59427DATAkey"
        );
    }

    #[test]
    fn confirm_rejects_mismatch_as_validation_failure() {
        let err = confirm("download_save", "aaaa", "bbbb").unwrap_err();
        assert!(matches!(err, SyncError::ValidationFailure { .. }));
        assert!(confirm("download_save", "aaaa", "aaaa").is_ok());
    }

    #[test]
    fn tampered_payload_changes_the_expected_hash() {
        let signer = DirectSigner::new("secret");
        let good = signer.sign(&pull_save_input("BPQSY", 42, 7, "PAYLOAD", "key"));
        let tampered = signer.sign(&pull_save_input("BPQSY", 42, 7, "PAYLOAD2", "key"));
        assert_ne!(good, tampered);
        assert!(confirm("download_save", &good, &tampered).is_err());
    }
}
