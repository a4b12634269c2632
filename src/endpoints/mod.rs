//! Sync endpoint operations, one module per server capability.
//!
//! Every operation follows the same call shape: build the path parameters
//! and a fresh salt, assemble the endpoint family's signature input, hand
//! the request to the transport, then branch on the response. An `error`
//! field fails the call, a recognized negative literal returns a typed
//! [`skysync_protocol::SyncOutcome::Negative`], and the positive literal
//! proceeds to hash validation and (for save payloads) decompression. No
//! retries happen at this layer.

pub mod download;
pub mod feeds;
pub mod friends;
pub mod gifts;
pub mod raffle;
pub mod register;
pub mod snapshots;
pub mod upload;
pub mod version;
pub mod visits;

pub use download::CloudSave;
