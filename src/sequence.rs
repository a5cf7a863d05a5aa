//! Fixed input-sequence detector for the auto-guess trigger.
//!
//! The detector consumes discrete key events and matches them against a
//! fixed ordered sequence, firing exactly once on a full match.  Its
//! whole state is the matched prefix length: a matching key advances it,
//! a mismatching key resets it (restarting at one when the offending key
//! happens to equal the sequence's first element).  The classic ten-key
//! cheat code is provided as the default sequence.

/// Matches a stream of key events against a fixed ordered sequence.
#[derive(Debug, Clone)]
pub struct SequenceDetector<K> {
    sequence: Vec<K>,
    matched: usize,
}

impl<K: PartialEq> SequenceDetector<K> {
    /// Creates a detector for the given key sequence.
    ///
    /// # Panics
    ///
    /// Panics if `sequence` is empty.
    pub fn new(sequence: Vec<K>) -> Self {
        assert!(!sequence.is_empty(), "sequence must not be empty");
        Self {
            sequence,
            matched: 0,
        }
    }

    /// Returns the current matched prefix length.
    pub fn progress(&self) -> usize {
        self.matched
    }

    /// Feeds one key event; returns `true` when the full sequence has
    /// just been matched.  Progress resets after a full match.
    pub fn push(&mut self, key: &K) -> bool {
        if self.sequence[self.matched] == *key {
            self.matched += 1;
            if self.matched == self.sequence.len() {
                self.matched = 0;
                return true;
            }
        } else if self.sequence[0] == *key {
            self.matched = 1;
        } else {
            self.matched = 0;
        }
        false
    }
}

impl SequenceDetector<String> {
    /// Detector for the classic ten-key cheat code, using browser-style
    /// key names.
    pub fn classic() -> Self {
        let keys = [
            "ArrowUp",
            "ArrowUp",
            "ArrowDown",
            "ArrowDown",
            "ArrowLeft",
            "ArrowRight",
            "ArrowLeft",
            "ArrowRight",
            "b",
            "a",
        ];
        Self::new(keys.iter().map(|key| key.to_string()).collect())
    }
}
