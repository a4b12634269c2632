//! MD5 digest rendering.
//!
//! The sync servers' signature scheme is MD5 over field-concatenated
//! strings, rendered as lowercase hex.

use md5::{Digest, Md5};

/// Lowercase hex MD5 of `input`.
pub fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_vector() {
        // RFC 1321 test vector.
        assert_eq!(md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn digest_is_deterministic_and_input_sensitive() {
        assert_eq!(md5_hex("tt/BPQSY/1"), md5_hex("tt/BPQSY/1"));
        assert_ne!(md5_hex("tt/BPQSY/1"), md5_hex("tt/BPQSY/2"));
    }
}
