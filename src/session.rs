//! The owned aggregate holding one day's game state.
//!
//! A [`GameSession`] ties together the day's header, the difficulty, the
//! bounded attempt ledger, the sticky win flag and the latest
//! digest/nonce pair.  All mutation flows through [`GameSession::submit_guess`],
//! so there is exactly one place where an evaluation becomes recorded
//! state; no ambient statics are involved.  The session snapshots to and
//! restores from the persisted [`GameSnapshot`] record.

use crate::digest::{evaluate, Difficulty, DigestCapability, DigestError};
use crate::header::PuzzleHeader;
use crate::ledger::{Attempt, AttemptLedger};
use crate::store::GameSnapshot;
use std::fmt;

/// Largest accepted nonce, the original client's maximum safe integer
/// (2^53 - 1).
pub const MAX_NONCE: u64 = 9_007_199_254_740_991;

/// User-visible errors produced while submitting a guess.
///
/// Both variants are recoverable: nothing is recorded, the counter does
/// not advance, and the player simply retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    /// The guess text was not a finite non-negative integer in range.
    InvalidNonce(String),
    /// The digest capability failed mid-evaluation.
    Digest(DigestError),
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNonce(text) => {
                write!(f, "invalid nonce {text:?}: expected an integer in 0..={MAX_NONCE}")
            }
            Self::Digest(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GuessError {}

impl From<DigestError> for GuessError {
    fn from(err: DigestError) -> Self {
        Self::Digest(err)
    }
}

/// Parses manual guess input into a nonce.
///
/// Rejects non-numeric, negative, fractional and out-of-range text with
/// [`GuessError::InvalidNonce`] before any digest work happens.
pub fn parse_nonce(text: &str) -> Result<u64, GuessError> {
    match text.trim().parse::<u64>() {
        Ok(nonce) if nonce <= MAX_NONCE => Ok(nonce),
        _ => Err(GuessError::InvalidNonce(text.to_string())),
    }
}

/// What one accepted guess produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Digest of `header + nonce`.
    pub digest_hex: String,
    /// Per-digit zero flags for the guess.
    pub attempt: Attempt,
    /// The session's win flag after recording this guess.
    pub won: bool,
}

/// One day's complete game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    header: PuzzleHeader,
    difficulty: Difficulty,
    ledger: AttemptLedger,
    won: bool,
    latest_hash: Option<String>,
    latest_nonce: Option<u64>,
}

impl GameSession {
    /// Creates a fresh session for the given header and difficulty.
    pub fn new(header: PuzzleHeader, difficulty: Difficulty) -> Self {
        Self {
            header,
            difficulty,
            ledger: AttemptLedger::new(),
            won: false,
            latest_hash: None,
            latest_nonce: None,
        }
    }

    /// Creates a session and immediately restores persisted progress.
    pub fn from_snapshot(
        header: PuzzleHeader,
        difficulty: Difficulty,
        snapshot: GameSnapshot,
    ) -> Self {
        let mut session = Self::new(header, difficulty);
        session.restore(snapshot);
        session
    }

    /// Returns the day's header.
    pub fn header(&self) -> &PuzzleHeader {
        &self.header
    }

    /// Returns the active puzzle number.
    pub fn puzzle_number(&self) -> u64 {
        self.header.puzzle_number()
    }

    /// Returns the session difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Read-only view of the attempt history.
    pub fn ledger(&self) -> &AttemptLedger {
        &self.ledger
    }

    /// Whether the puzzle has been solved.  Sticky once set.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Digest of the most recent guess, if any.
    pub fn latest_hash(&self) -> Option<&str> {
        self.latest_hash.as_deref()
    }

    /// Nonce of the most recent guess, if any.
    pub fn latest_nonce(&self) -> Option<u64> {
        self.latest_nonce
    }

    /// Evaluates and records one guess.
    ///
    /// On success the attempt lands in the ledger, the latest
    /// digest/nonce are updated and the win flag is set if every flag of
    /// the attempt is true.  On error the session is unchanged.
    pub fn submit_guess(
        &mut self,
        nonce: u64,
        capability: &impl DigestCapability,
    ) -> Result<GuessOutcome, GuessError> {
        if nonce > MAX_NONCE {
            return Err(GuessError::InvalidNonce(nonce.to_string()));
        }
        let evaluation = evaluate(self.header.header(), nonce, self.difficulty, capability)?;
        self.ledger.record(evaluation.attempt.clone());
        self.latest_hash = Some(evaluation.digest_hex.clone());
        self.latest_nonce = Some(nonce);
        if evaluation.attempt.is_winning() {
            self.won = true;
        }
        Ok(GuessOutcome {
            digest_hex: evaluation.digest_hex,
            attempt: evaluation.attempt,
            won: self.won,
        })
    }

    /// Parses manual guess text and submits it.
    pub fn submit_guess_text(
        &mut self,
        text: &str,
        capability: &impl DigestCapability,
    ) -> Result<GuessOutcome, GuessError> {
        let nonce = parse_nonce(text)?;
        self.submit_guess(nonce, capability)
    }

    /// Captures the session as a persistable record.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            attempts: self.ledger.to_rows(),
            total_guesses: self.ledger.total_guesses(),
            won: self.won,
            latest_hash: self.latest_hash.clone(),
            latest_nonce: self.latest_nonce,
        }
    }

    /// Replaces the session state with a persisted record.
    ///
    /// Nothing is recomputed: the win flag and history round-trip
    /// exactly as stored.
    pub fn restore(&mut self, snapshot: GameSnapshot) {
        self.ledger = AttemptLedger::from_rows(snapshot.attempts, snapshot.total_guesses);
        self.won = snapshot.won;
        self.latest_hash = snapshot.latest_hash;
        self.latest_nonce = snapshot.latest_nonce;
    }
}
