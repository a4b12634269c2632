//! Per-request salt generation.
//!
//! Every signed request carries a fresh unsigned 32-bit salt; the salt goes
//! into both the request path and the signature input, so replaying a
//! captured URL fails. Salts are never reused across retries.

use rand::Rng;

/// Source of request salts. The default draws from the thread-local CSPRNG;
/// tests substitute a fixed source to make signatures reproducible.
pub trait SaltSource: Send + Sync {
    /// A fresh salt. Each call is independent; no sequencing.
    fn next_salt(&self) -> u32;
}

/// Thread-safe random salt source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSalt;

impl SaltSource for RandomSalt {
    fn next_salt(&self) -> u32 {
        rand::thread_rng().gen()
    }
}

/// Fixed salt source for reproducing recorded exchanges.
#[derive(Debug, Clone, Copy)]
pub struct FixedSalt(pub u32);

impl SaltSource for FixedSalt {
    fn next_salt(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_salt_repeats_its_value() {
        let source = FixedSalt(123_456_789);
        assert_eq!(source.next_salt(), 123_456_789);
        assert_eq!(source.next_salt(), 123_456_789);
    }

    #[test]
    fn random_salts_are_not_obviously_sequenced() {
        let source = RandomSalt;
        let a: Vec<u32> = (0..4).map(|_| source.next_salt()).collect();
        // Four identical draws from a 32-bit space means a broken source.
        assert!(a.windows(2).any(|w| w[0] != w[1]));
    }
}
