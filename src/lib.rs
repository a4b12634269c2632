//! skysync - save codec and authenticated cloud-sync client for the tower
//! game's sync servers.
//!
//! The wire format and authentication scheme have no published
//! specification; both were reconstructed from observed behavior and are
//! preserved here bit-for-bit, quirks included. The crate splits into:
//!
//! - [`skysync_codec`] - the block codec and compression codec;
//! - [`skysync_protocol`] - endpoint registry, response envelope, errors;
//! - this crate - configuration, signing, validation, and one typed
//!   operation per server capability, composed over a caller-supplied
//!   [`transport::Transport`].
//!
//! Codec and signing operations are pure and synchronous; the only I/O is
//! behind the transport trait, and the only shared mutable state is the
//! salt source's entropy.

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod save;
pub mod transport;

pub use skysync_codec as codec;
pub use skysync_protocol as protocol;

pub use auth::{DirectSigner, FixedSalt, ProxySigner, RandomSalt, SaltSource, Signer};
pub use client::SyncClient;
pub use config::{BurnBot, ConfigError, PlayerConfig, ProxyConfig, SyncConfig};
pub use endpoints::CloudSave;
pub use protocol::{Negative, SyncError, SyncOutcome};
pub use save::{UploadMetadata, UploadOptions};
pub use transport::{Transport, TransportError, TransportRequest};
