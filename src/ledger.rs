//! Bounded attempt history for a single puzzle day.
//!
//! Every evaluated guess yields an [`Attempt`]: one boolean per required
//! leading hex digit, `true` where the digest showed a zero.  The
//! [`AttemptLedger`] keeps the most recent [`MAX_ATTEMPTS`] of them in
//! order (oldest dropped on overflow) alongside a total-guess counter
//! that is never truncated and never decremented.  The ledger stores
//! history only; deciding and holding the win flag is the session's job.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of attempts retained in a ledger.
pub const MAX_ATTEMPTS: usize = 1000;

/// The per-digit outcome of one evaluated guess.
///
/// `flags()[i]` is `true` when the `i`-th leading hex digit of the
/// digest was `'0'`.  Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attempt(Vec<bool>);

impl Attempt {
    /// Wraps the per-digit zero flags of one evaluation.
    pub fn new(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// Returns the per-digit flags, leading digit first.
    pub fn flags(&self) -> &[bool] {
        &self.0
    }

    /// Returns `true` when every required digit was zero.
    pub fn is_winning(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&flag| flag)
    }
}

/// Ordered, size-bounded log of attempts plus an uncapped guess counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttemptLedger {
    attempts: VecDeque<Attempt>,
    total_guesses: u64,
}

impl AttemptLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attempt, dropping the oldest entries beyond
    /// [`MAX_ATTEMPTS`], and unconditionally advances the counter.
    pub fn record(&mut self, attempt: Attempt) {
        self.attempts.push_back(attempt);
        while self.attempts.len() > MAX_ATTEMPTS {
            self.attempts.pop_front();
        }
        self.total_guesses += 1;
    }

    /// Iterates the retained attempts, oldest first.
    pub fn attempts(&self) -> impl Iterator<Item = &Attempt> {
        self.attempts.iter()
    }

    /// Number of attempts currently retained (at most [`MAX_ATTEMPTS`]).
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    /// Returns `true` when no attempts are retained.
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Total guesses ever recorded, independent of truncation.
    pub fn total_guesses(&self) -> u64 {
        self.total_guesses
    }

    /// Copies the retained attempts into plain boolean rows for
    /// persistence, oldest first.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.attempts
            .iter()
            .map(|attempt| attempt.flags().to_vec())
            .collect()
    }

    /// Rebuilds a ledger from persisted rows and a saved counter.
    ///
    /// Oversized histories from malformed records are re-capped to
    /// [`MAX_ATTEMPTS`] by dropping the oldest rows.
    pub fn from_rows(rows: Vec<Vec<bool>>, total_guesses: u64) -> Self {
        let skip = rows.len().saturating_sub(MAX_ATTEMPTS);
        let attempts = rows.into_iter().skip(skip).map(Attempt::new).collect();
        Self {
            attempts,
            total_guesses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Attempt, AttemptLedger, MAX_ATTEMPTS};

    #[test]
    fn test_attempt_win_detection() {
        assert!(Attempt::new(vec![true, true, true]).is_winning());
        assert!(!Attempt::new(vec![true, false, true]).is_winning());
        assert!(!Attempt::new(Vec::new()).is_winning());
    }

    #[test]
    fn test_record_preserves_order() {
        let mut ledger = AttemptLedger::new();
        ledger.record(Attempt::new(vec![true, false]));
        ledger.record(Attempt::new(vec![false, false]));
        let rows = ledger.to_rows();
        assert_eq!(rows, vec![vec![true, false], vec![false, false]]);
        assert_eq!(ledger.total_guesses(), 2);
    }

    #[test]
    fn test_cap_drops_oldest_but_counter_keeps_counting() {
        let mut ledger = AttemptLedger::new();
        for i in 0..=MAX_ATTEMPTS {
            // Tag each attempt by parity so the dropped row is identifiable.
            ledger.record(Attempt::new(vec![i % 2 == 0]));
        }
        assert_eq!(ledger.len(), MAX_ATTEMPTS);
        assert_eq!(ledger.total_guesses(), MAX_ATTEMPTS as u64 + 1);
        // Row 0 (flag true) was dropped; the retained front is row 1.
        assert_eq!(ledger.attempts().next().unwrap().flags(), &[false]);
    }

    #[test]
    fn test_round_trip_through_rows() {
        let mut ledger = AttemptLedger::new();
        ledger.record(Attempt::new(vec![true, true]));
        ledger.record(Attempt::new(vec![false, true]));
        let rebuilt = AttemptLedger::from_rows(ledger.to_rows(), ledger.total_guesses());
        assert_eq!(rebuilt, ledger);
    }

    #[test]
    fn test_from_rows_recaps_oversized_history() {
        let rows = vec![vec![false]; MAX_ATTEMPTS + 5];
        let ledger = AttemptLedger::from_rows(rows, 2000);
        assert_eq!(ledger.len(), MAX_ATTEMPTS);
        assert_eq!(ledger.total_guesses(), 2000);
    }
}
