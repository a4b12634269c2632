//! Wire-level types shared by the sync client.
//!
//! Defines the endpoint registry, the JSON response envelope with its
//! success/negative/error disposition rules, and the error taxonomy every
//! sync operation surfaces.

pub mod error;
pub mod ops;
pub mod response;

pub use error::SyncError;
pub use ops::{HttpMethod, SyncItemType, SyncOp};
pub use response::{
    classify, payload, BitbookFeedPost, CurrentVersion, Disposition, DownloadedSave, Envelope,
    FriendMeta, FriendTower, Gift, Negative, NewUser, PlayerDetails, PlayerMeta, PlayerRecord,
    PulledSnapshot, RaffleDetails, SnapshotEntry, SnapshotList, SyncOutcome, UploadReceipt,
    VerifiedDevice, Visits,
};

/// Game tag prefixed to every endpoint path and every signature input.
pub const GAME_TAG: &str = "tt";

/// Default sync server.
pub const DEFAULT_SYNC_HOST: &str = "https://sync.nimblebit.com";

/// Static cloud feed for bitbook posts.
pub const BITBOOK_FEED_URL: &str = "https://s3.amazonaws.com/NBStatic/TTUnityCloudBBPost.json";

/// Static cloud feed for free gift drops.
pub const CLOUD_GIFT_FEED_URL: &str = "https://s3.amazonaws.com/NBStatic/TTUnityCloudGift.json";

/// Static feed describing the current raffle drawing.
pub const RAFFLE_DETAILS_URL: &str = "https://s3.amazonaws.com/NBStatic/sync/tt/currentRaffle.json";
