#![deny(missing_docs)]

//! # hashle
//!
//! **hashle** is the engine of a daily hash-puzzle game: every calendar
//! day has a deterministic "block header" line, and the player hunts for
//! an integer nonce whose SHA-256 digest of `header + nonce` starts with
//! a target number of zero hex digits.  The crate provides the complete
//! core — header generation, guess evaluation, attempt bookkeeping, a
//! cancellable auto-guess loop and best-effort progress persistence —
//! and leaves all presentation to the caller.
//!
//! ## Features
//!
//! * **Deterministic daily puzzles**: the [`header`](crate::PuzzleHeader)
//!   for a puzzle day is byte-identical for every player, fabricated
//!   from a seeded four-word [`Sfc32`] generator.
//! * **Guess evaluation**: [`evaluate`] reduces a digest to per-digit
//!   zero flags at a tunable [`Difficulty`]; the hash itself sits behind
//!   the [`DigestCapability`] seam.
//! * **Attempt ledger**: the [`AttemptLedger`] retains the most recent
//!   1000 attempts while its guess counter keeps counting.
//! * **Auto-guess scheduler**: [`AutoGuesser`] drives a cooperative,
//!   strictly sequential guessing loop that a [`StopToken`] can cancel
//!   between iterations.
//! * **Persistence**: one JSON [`GameSnapshot`] per puzzle number
//!   through any [`ProgressStore`]; reads and writes are best-effort.
//!
//! ## Usage
//!
//! ```rust
//! use hashle::{Difficulty, GameSession, PuzzleHeader, Sha256Digest};
//!
//! let header = PuzzleHeader::for_day(1);
//! let mut session = GameSession::new(header, Difficulty::new(2));
//! let outcome = session.submit_guess(42, &Sha256Digest).unwrap();
//! assert_eq!(outcome.attempt.flags().len(), 2);
//! assert_eq!(session.ledger().total_guesses(), 1);
//! ```

mod digest;
mod header;
mod ledger;
mod prng;
mod scheduler;
mod sequence;
mod session;
mod store;

pub use digest::{
    evaluate, Difficulty, DigestCapability, DigestError, Evaluation, Sha256Digest,
    DEFAULT_TARGET_DIGITS,
};
pub use header::{
    build_header, current_puzzle_number, puzzle_number_for_millis, PuzzleHeader, DAY_MILLIS,
    HEADER_VERSION, PUZZLE_EPOCH_MILLIS,
};
pub use ledger::{Attempt, AttemptLedger, MAX_ATTEMPTS};
pub use prng::Sfc32;
pub use scheduler::{AutoGuessReport, AutoGuesser, StopToken};
pub use sequence::SequenceDetector;
pub use session::{parse_nonce, GameSession, GuessError, GuessOutcome, MAX_NONCE};
pub use store::{
    load_progress, progress_key, save_progress, FileStore, GameSnapshot, MemoryStore,
    ProgressStore, StoreError,
};
