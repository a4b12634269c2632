//! Request signing and response validation.
//!
//! A signed request is `{salt, hash, endpoint path}`, derived per call and
//! never persisted. The hash is an MD5 over an endpoint-specific field
//! concatenation ([`fields`]) completed with the shared secret by a
//! [`signer::Signer`] backend; responses that echo payload data carry their
//! own hash, recomputed and checked by [`validate`].

pub mod digest;
pub mod fields;
pub mod salt;
pub mod signer;
pub mod validate;

pub use digest::md5_hex;
pub use salt::{FixedSalt, RandomSalt, SaltSource};
pub use signer::{DirectSigner, ProxySigner, Signer};
