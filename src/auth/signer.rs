//! Signer backends.
//!
//! Both backends satisfy one [`Signer`] interface, selected when the client
//! is built, never branched on per call site. The *direct* backend holds
//! the shared secret and completes signatures locally. The *proxied*
//! backend belongs to sessions that do not know the secret: the raw hash
//! input is forwarded to a trusted signing proxy which appends the secret
//! and digests server-side, and response validation uses the proxy's
//! `proxiedHash` instead of a local recomputation.

use super::digest::md5_hex;

/// Completes an endpoint-specific hash input into a request signature.
pub trait Signer: Send + Sync {
    /// Complete `hash_input` into the value the server will compare.
    fn sign(&self, hash_input: &str) -> String;

    /// Whether signatures are completed by a remote proxy. When true,
    /// callers must treat a response's `proxiedHash` as the expected
    /// validation hash and skip local recomputation.
    fn is_proxied(&self) -> bool;
}

/// Local signer holding the shared secret.
pub struct DirectSigner {
    secret_salt: String,
}

impl DirectSigner {
    pub fn new(secret_salt: impl Into<String>) -> Self {
        Self {
            secret_salt: secret_salt.into(),
        }
    }
}

impl Signer for DirectSigner {
    fn sign(&self, hash_input: &str) -> String {
        md5_hex(&format!("{hash_input}{}", self.secret_salt))
    }

    fn is_proxied(&self) -> bool {
        false
    }
}

/// Pass-through signer for proxied sessions. The hash input leaves the
/// client unfinished; the signing proxy appends the secret it holds.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProxySigner;

impl Signer for ProxySigner {
    fn sign(&self, hash_input: &str) -> String {
        hash_input.to_string()
    }

    fn is_proxied(&self) -> bool {
        true
    }
}
