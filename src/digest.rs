//! Guess evaluation against the daily header.
//!
//! A guess is scored by hashing the UTF-8 bytes of the header followed by
//! the decimal text of the nonce, then checking how many of the leading
//! hex digits of the digest are `'0'`.  The hash itself is obtained
//! through the [`DigestCapability`] seam so the production SHA-256
//! implementation can be swapped for scripted or failing capabilities in
//! tests, mirroring how the surrounding platform treats the digest as a
//! given external primitive.

use crate::ledger::Attempt;
use sha2::{Digest, Sha256};
use std::fmt;

/// Default number of leading zero hex digits required to win.
pub const DEFAULT_TARGET_DIGITS: usize = 4;

/// Difficulty of a deployment: the number of leading digest digits that
/// must all be zero.  A tunable parameter, not a hard-coded literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty(usize);

impl Difficulty {
    /// Creates a difficulty requiring `digits` leading zero hex digits.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= digits <= 64` (a SHA-256 digest has 64 hex
    /// digits).
    pub fn new(digits: usize) -> Self {
        assert!(
            (1..=64).contains(&digits),
            "difficulty must be between 1 and 64 hex digits"
        );
        Self(digits)
    }

    /// Returns the required digit count.
    pub fn digits(&self) -> usize {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(DEFAULT_TARGET_DIGITS)
    }
}

/// Failure of the external digest capability.
///
/// Never fatal: the guess is not recorded, the counter does not advance,
/// and the message is routed to the user-visible error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestError(String);

impl DigestError {
    /// Wraps a capability failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for DigestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "digest computation failed: {}", self.0)
    }
}

impl std::error::Error for DigestError {}

/// The cryptographic digest capability required by the evaluator.
///
/// Implementations must return the 64 lowercase hex characters of a
/// 256-bit digest of the input bytes.
pub trait DigestCapability {
    /// Hashes `bytes` and returns the hex-encoded 256-bit digest.
    fn digest_hex(&self, bytes: &[u8]) -> Result<String, DigestError>;
}

/// Production SHA-256 digest capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl DigestCapability for Sha256Digest {
    fn digest_hex(&self, bytes: &[u8]) -> Result<String, DigestError> {
        Ok(hex::encode(Sha256::digest(bytes)))
    }
}

/// The digest of one guess together with its per-digit outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Hex-encoded digest of `header + nonce`.
    pub digest_hex: String,
    /// Per-leading-digit zero flags, one per required digit.
    pub attempt: Attempt,
}

/// Evaluates a nonce against a header at the given difficulty.
///
/// The digest input is the UTF-8 bytes of `header` immediately followed
/// by the decimal text of `nonce`.  The returned attempt has exactly
/// `difficulty.digits()` flags, `flags()[i]` true when digit `i` of the
/// digest is `'0'`.  A capability returning anything other than 64
/// characters is reported as a [`DigestError`] rather than scored.
pub fn evaluate(
    header: &str,
    nonce: u64,
    difficulty: Difficulty,
    capability: &impl DigestCapability,
) -> Result<Evaluation, DigestError> {
    let mut preimage = String::with_capacity(header.len() + 20);
    preimage.push_str(header);
    preimage.push_str(&nonce.to_string());
    let digest_hex = capability.digest_hex(preimage.as_bytes())?;
    if digest_hex.len() != 64 {
        return Err(DigestError::new(format!(
            "expected 64 digest characters, got {}",
            digest_hex.len()
        )));
    }
    let flags = digest_hex
        .chars()
        .take(difficulty.digits())
        .map(|digit| digit == '0')
        .collect();
    Ok(Evaluation {
        digest_hex,
        attempt: Attempt::new(flags),
    })
}

#[cfg(test)]
mod tests {
    use super::{evaluate, Difficulty, DigestCapability, DigestError, Sha256Digest};

    /// Capability returning a scripted digest regardless of input.
    struct ScriptedDigest(&'static str);

    impl DigestCapability for ScriptedDigest {
        fn digest_hex(&self, _bytes: &[u8]) -> Result<String, DigestError> {
            Ok(self.0.to_string())
        }
    }

    /// Capability that always fails.
    struct BrokenDigest;

    impl DigestCapability for BrokenDigest {
        fn digest_hex(&self, _bytes: &[u8]) -> Result<String, DigestError> {
            Err(DigestError::new("capability offline"))
        }
    }

    #[test]
    fn test_sha256_known_vector() {
        let digest = Sha256Digest.digest_hex(b"abc").unwrap();
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let lhs = evaluate("header", 42, Difficulty::new(3), &Sha256Digest).unwrap();
        let rhs = evaluate("header", 42, Difficulty::new(3), &Sha256Digest).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_preimage_is_header_then_decimal_nonce() {
        let direct = Sha256Digest.digest_hex(b"X7").unwrap();
        let evaluated = evaluate("X", 7, Difficulty::new(1), &Sha256Digest).unwrap();
        assert_eq!(evaluated.digest_hex, direct);
    }

    #[test]
    fn test_flags_mirror_leading_digits() {
        let evaluation = evaluate(
            "X",
            0,
            Difficulty::new(4),
            &ScriptedDigest("00ab000000000000000000000000000000000000000000000000000000000000"),
        )
        .unwrap();
        assert_eq!(evaluation.attempt.flags(), &[true, true, false, false]);
        assert!(!evaluation.attempt.is_winning());
    }

    #[test]
    fn test_all_zero_prefix_wins() {
        let evaluation = evaluate(
            "X",
            0,
            Difficulty::new(2),
            &ScriptedDigest("00ab000000000000000000000000000000000000000000000000000000000000"),
        )
        .unwrap();
        assert_eq!(evaluation.attempt.flags(), &[true, true]);
        assert!(evaluation.attempt.is_winning());
    }

    #[test]
    fn test_result_length_tracks_difficulty() {
        for digits in [1usize, 2, 4, 64] {
            let evaluation =
                evaluate("header", 9, Difficulty::new(digits), &Sha256Digest).unwrap();
            assert_eq!(evaluation.attempt.flags().len(), digits);
            assert_eq!(evaluation.digest_hex.len(), 64);
        }
    }

    #[test]
    fn test_truncated_digest_is_an_error_not_a_win() {
        let err = evaluate("X", 0, Difficulty::new(4), &ScriptedDigest("00")).unwrap_err();
        assert_eq!(err, DigestError::new("expected 64 digest characters, got 2"));
    }

    #[test]
    fn test_capability_failure_propagates() {
        let err = evaluate("header", 1, Difficulty::new(2), &BrokenDigest).unwrap_err();
        assert_eq!(err, DigestError::new("capability offline"));
    }

    #[test]
    #[should_panic(expected = "difficulty must be between 1 and 64")]
    fn test_zero_difficulty_rejected() {
        Difficulty::new(0);
    }
}
