//! Daily puzzle numbering and deterministic header construction.
//!
//! The puzzle number is a pure function of the calendar day: whole days
//! elapsed since a fixed epoch, plus one.  The header for a given puzzle
//! number is a single-line, semicolon-delimited `key=value` record whose
//! fields (version, previous-height placeholder, height, synthetic
//! timestamp, merkle) are byte-identical across runs, sessions and
//! platforms.  The merkle field is fabricated from the seeded [`Sfc32`]
//! generator so that every player sees the same 64 hex characters.

use crate::prng::Sfc32;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unix milliseconds of the puzzle epoch, 2024-01-01T00:00:00Z.
pub const PUZZLE_EPOCH_MILLIS: u64 = 1_704_067_200_000;

/// Milliseconds in one calendar day.
pub const DAY_MILLIS: u64 = 86_400_000;

/// Header format version embedded in every generated header.
pub const HEADER_VERSION: u32 = 1;

// Distinct odd multipliers decorrelate the four seed words derived from
// a single puzzle number.
const SEED_MULT_A: u64 = 0x9e37_79b9;
const SEED_MULT_B: u64 = 0x85eb_ca6b;
const SEED_MULT_C: u64 = 0xc2b2_ae35;
const SEED_MULT_D: u64 = 0x27d4_eb2f;

/// Returns the puzzle number active at the given Unix-millisecond instant.
///
/// Strictly increases by exactly one per calendar day and never falls
/// below one; instants before the epoch clamp to puzzle 1.
pub fn puzzle_number_for_millis(now_millis: u64) -> u64 {
    if now_millis <= PUZZLE_EPOCH_MILLIS {
        return 1;
    }
    (now_millis - PUZZLE_EPOCH_MILLIS) / DAY_MILLIS + 1
}

/// Returns the puzzle number for the current system clock.
pub fn current_puzzle_number() -> u64 {
    let now_millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);
    puzzle_number_for_millis(now_millis)
}

/// Builds the deterministic header line for `puzzle_number`.
///
/// Field order is fixed: `version`, `prev` (a 64-character zero-padded
/// placeholder embedding `puzzle_number - 1`), `height` (the puzzle
/// number itself), `timestamp` (the epoch plus one day per elapsed
/// puzzle) and `merkle` (64 lowercase hex characters, one seeded
/// generator call per byte).
///
/// # Panics
///
/// Panics if `puzzle_number` is zero.
pub fn build_header(puzzle_number: u64) -> String {
    assert!(puzzle_number >= 1, "puzzle numbers start at 1");
    let mut rng = Sfc32::new(
        puzzle_number.wrapping_mul(SEED_MULT_A) as u32,
        puzzle_number.wrapping_mul(SEED_MULT_B) as u32,
        puzzle_number.wrapping_mul(SEED_MULT_C) as u32,
        puzzle_number.wrapping_mul(SEED_MULT_D) as u32,
    );
    let mut merkle_bytes = [0u8; 32];
    for byte in merkle_bytes.iter_mut() {
        *byte = rng.next_byte();
    }
    let timestamp = PUZZLE_EPOCH_MILLIS + (puzzle_number - 1) * DAY_MILLIS;
    format!(
        "version={};prev={:064};height={};timestamp={};merkle={}",
        HEADER_VERSION,
        puzzle_number - 1,
        puzzle_number,
        timestamp,
        hex::encode(merkle_bytes)
    )
}

/// A puzzle number paired with its generated header line.
///
/// Immutable once built; a new value is constructed only when the puzzle
/// number changes (once per calendar day in normal operation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleHeader {
    puzzle_number: u64,
    header: String,
}

impl PuzzleHeader {
    /// Builds the header for an explicit puzzle day.
    ///
    /// # Panics
    ///
    /// Panics if `puzzle_number` is zero.
    pub fn for_day(puzzle_number: u64) -> Self {
        Self {
            puzzle_number,
            header: build_header(puzzle_number),
        }
    }

    /// Builds the header for the current calendar day.
    pub fn today() -> Self {
        Self::for_day(current_puzzle_number())
    }

    /// Returns the puzzle number this header belongs to.
    pub fn puzzle_number(&self) -> u64 {
        self.puzzle_number
    }

    /// Returns the generated header line.
    pub fn header(&self) -> &str {
        &self.header
    }
}
