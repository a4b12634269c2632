//! Endpoint registry for the sync servers.
//!
//! Every operation hangs off `https://<host><prefix>{params...}/{salt}/
//! {hash}`; the prefixes below were reconstructed from observed traffic.

use std::fmt;

/// HTTP method for a sync operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// One server capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    /// Provision a fresh account.
    Register,
    /// Confirm an emailed device verification code.
    VerifyDevice,
    /// Ask the server to email a verification code.
    RegisterEmail,
    /// Download the current cloud save.
    PullSave,
    /// Upload a new cloud save.
    PushSave,
    /// Fetch the version number of the current cloud save.
    CurrentVersion,
    /// Enter the hourly raffle.
    EnterRaffle,
    /// Enter the next several raffles at once.
    EnterMultiRaffle,
    /// Check whether the player is in the current drawing.
    EnteredCurrent,
    /// Send an item (gift, visiting doorman) to another player.
    SendItem,
    /// List gifts waiting for the player.
    GetGifts,
    /// Mark a gift as received.
    ReceiveGift,
    /// Fetch a friend's profile metadata.
    FriendPullMeta,
    /// Download a friend's tower save.
    FriendPullTower,
    /// List visits waiting for the player.
    GetVisits,
    /// Store a named save checkpoint.
    PushSnapshot,
    /// Fetch a save checkpoint by id.
    PullSnapshot,
    /// List the player's save checkpoints.
    SnapshotList,
    /// List a friend's save checkpoints.
    FriendSnapshotList,
    /// Fetch the player's account record.
    PlayerDetails,
}

impl SyncOp {
    /// Path prefix up to (and including) the game tag.
    pub fn path_prefix(self) -> &'static str {
        match self {
            SyncOp::Register => "/register/tt/",
            SyncOp::VerifyDevice => "/verify_device/tt/",
            SyncOp::RegisterEmail => "/register_email/tt/",
            SyncOp::PullSave => "/sync/pull/tt/",
            SyncOp::PushSave => "/sync/push/tt/",
            SyncOp::CurrentVersion => "/sync/current_version/tt/",
            SyncOp::EnterRaffle => "/raffle/enter/tt/",
            SyncOp::EnterMultiRaffle => "/raffle/enter_multi/tt/",
            SyncOp::EnteredCurrent => "/raffle/entered_current/tt/",
            SyncOp::SendItem => "/send_item/tt/",
            SyncOp::GetGifts => "/get_gifts/tt/",
            SyncOp::ReceiveGift => "/receive_item/tt/",
            SyncOp::FriendPullMeta => "/friend/pull_meta/tt/",
            SyncOp::FriendPullTower => "/friend/pull_game/tt/",
            SyncOp::GetVisits => "/get_visits/tt/",
            SyncOp::PushSnapshot => "/sync/push_snapshot/tt/",
            SyncOp::PullSnapshot => "/sync/pull_snapshot/tt/",
            SyncOp::SnapshotList => "/sync/current_snapshots/tt/",
            SyncOp::FriendSnapshotList => "/sync/current_player_snapshots/tt/",
            SyncOp::PlayerDetails => "/player_details/tt/",
        }
    }

    /// HTTP method the server expects for this operation.
    pub fn method(self) -> HttpMethod {
        match self {
            SyncOp::PushSave
            | SyncOp::PushSnapshot
            | SyncOp::SendItem
            | SyncOp::RegisterEmail
            | SyncOp::FriendPullMeta => HttpMethod::Post,
            _ => HttpMethod::Get,
        }
    }
}

/// Kinds of items the `send_item` operation can carry. The literal goes
/// into both the request path and the signature input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncItemType {
    /// Placeholder, unused by the servers.
    None,
    /// A bitizen sent by another player.
    Play,
    Gift,
    /// Server-side giveaways.
    Cloud,
    /// Raffle winnings.
    Raffle,
    /// A visiting doorman.
    Visit,
}

impl SyncItemType {
    /// The wire literal.
    pub fn literal(self) -> &'static str {
        match self {
            SyncItemType::None => "None",
            SyncItemType::Play => "Play",
            SyncItemType::Gift => "Gift",
            SyncItemType::Cloud => "Cloud",
            SyncItemType::Raffle => "Raffle",
            SyncItemType::Visit => "Visit",
        }
    }
}

impl fmt::Display for SyncItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prefix_carries_the_game_tag() {
        let ops = [
            SyncOp::Register,
            SyncOp::VerifyDevice,
            SyncOp::RegisterEmail,
            SyncOp::PullSave,
            SyncOp::PushSave,
            SyncOp::CurrentVersion,
            SyncOp::EnterRaffle,
            SyncOp::EnterMultiRaffle,
            SyncOp::EnteredCurrent,
            SyncOp::SendItem,
            SyncOp::GetGifts,
            SyncOp::ReceiveGift,
            SyncOp::FriendPullMeta,
            SyncOp::FriendPullTower,
            SyncOp::GetVisits,
            SyncOp::PushSnapshot,
            SyncOp::PullSnapshot,
            SyncOp::SnapshotList,
            SyncOp::FriendSnapshotList,
            SyncOp::PlayerDetails,
        ];
        for op in ops {
            assert!(
                op.path_prefix().ends_with("/tt/"),
                "{op:?} prefix should end with the game tag"
            );
        }
    }

    #[test]
    fn upload_style_operations_post() {
        assert_eq!(SyncOp::PushSave.method(), HttpMethod::Post);
        assert_eq!(SyncOp::PushSnapshot.method(), HttpMethod::Post);
        assert_eq!(SyncOp::PullSave.method(), HttpMethod::Get);
    }
}
