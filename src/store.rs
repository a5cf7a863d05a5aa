//! Best-effort persistence of per-puzzle progress.
//!
//! Progress is stored through the [`ProgressStore`] seam: a plain
//! string-keyed, string-valued store modelling the client-local
//! key-value capability.  Each puzzle owns one JSON record keyed by
//! [`progress_key`]; records are overwritten on every change
//! (last write wins, no merge, no versioning) and never deleted.
//! Failures are deliberately soft: a read problem behaves as "no prior
//! record" and a write problem is silently dropped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Errors raised by a progress store implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Underlying I/O error while reading or writing a record.
    Io(String),
    /// A record could not be serialized or deserialized.
    Serde(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store I/O error: {err}"),
            Self::Serde(err) => write!(f, "store serialization error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The persistent key-value capability.
pub trait ProgressStore {
    /// Reads the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The persisted record for one puzzle day.
///
/// Serialized with camelCase keys to stay readable alongside records
/// written by earlier clients of the same game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Retained attempt rows, oldest first, one flag per target digit.
    pub attempts: Vec<Vec<bool>>,
    /// Total guesses ever made for this puzzle.
    pub total_guesses: u64,
    /// Whether the puzzle has been solved.
    pub won: bool,
    /// Digest of the most recent guess, if any.
    pub latest_hash: Option<String>,
    /// Nonce of the most recent guess, if any.
    pub latest_nonce: Option<u64>,
}

/// Returns the deterministic store key for a puzzle number.
pub fn progress_key(puzzle_number: u64) -> String {
    format!("hashle_puzzle_{puzzle_number}")
}

/// File-backed store writing one `<key>.json` document per record.
///
/// Writes go through a temporary file and an atomic rename so a crash
/// mid-save never leaves a truncated record behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`; the directory is created lazily
    /// on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ProgressStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err.to_string())),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|err| StoreError::Io(err.to_string()))?;
        let path = self.record_path(key);
        let tmp_path = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp_path, value).map_err(|err| StoreError::Io(err.to_string()))?;
        fs::rename(&tmp_path, &path).map_err(|err| StoreError::Io(err.to_string()))?;
        Ok(())
    }
}

/// In-memory store used in tests and as a faithful model of the
/// browser-style key-value capability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Io("store mutex poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Io("store mutex poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads the snapshot for `puzzle_number`, treating read failures and
/// malformed records as "no prior record".
pub fn load_progress(store: &impl ProgressStore, puzzle_number: u64) -> Option<GameSnapshot> {
    let raw = store.load(&progress_key(puzzle_number)).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

/// Saves the snapshot for `puzzle_number`, best-effort.
///
/// A failed write is silently ignored: persistence is a fire-and-forget
/// side effect with no acknowledgment and no retry.
pub fn save_progress(store: &impl ProgressStore, puzzle_number: u64, snapshot: &GameSnapshot) {
    if let Ok(raw) = serde_json::to_string(snapshot) {
        let _ = store.save(&progress_key(puzzle_number), &raw);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        load_progress, progress_key, save_progress, FileStore, GameSnapshot, MemoryStore,
        ProgressStore, StoreError,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Store whose writes always fail and whose reads return garbage.
    struct FlakyStore;

    impl ProgressStore for FlakyStore {
        fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(Some("not json".to_string()))
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("quota exceeded".to_string()))
        }
    }

    fn sample_snapshot() -> GameSnapshot {
        GameSnapshot {
            attempts: vec![vec![true, false], vec![true, true]],
            total_guesses: 7,
            won: true,
            latest_hash: Some("00ab".to_string()),
            latest_nonce: Some(99),
        }
    }

    #[test]
    fn test_progress_key_is_deterministic() {
        assert_eq!(progress_key(12), "hashle_puzzle_12");
        assert_eq!(progress_key(12), progress_key(12));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(load_progress(&store, 3), None);
        let snapshot = sample_snapshot();
        save_progress(&store, 3, &snapshot);
        assert_eq!(load_progress(&store, 3), Some(snapshot));
        // A different puzzle remains absent.
        assert_eq!(load_progress(&store, 4), None);
    }

    #[test]
    fn test_last_write_wins() {
        let store = MemoryStore::new();
        save_progress(&store, 5, &sample_snapshot());
        let mut updated = sample_snapshot();
        updated.total_guesses = 8;
        save_progress(&store, 5, &updated);
        assert_eq!(load_progress(&store, 5), Some(updated));
    }

    #[test]
    fn test_malformed_record_reads_as_absent() {
        let store = MemoryStore::new();
        store.save(&progress_key(9), "{ definitely not json").unwrap();
        assert_eq!(load_progress(&store, 9), None);
    }

    #[test]
    fn test_flaky_store_is_silently_tolerated() {
        let store = FlakyStore;
        // Garbage read behaves as a fresh state.
        assert_eq!(load_progress(&store, 1), None);
        // Failed write does not panic or surface.
        save_progress(&store, 1, &sample_snapshot());
    }

    #[test]
    fn test_snapshot_record_uses_camel_case_keys() {
        let raw = serde_json::to_string(&sample_snapshot()).unwrap();
        assert!(raw.contains("\"totalGuesses\""));
        assert!(raw.contains("\"latestHash\""));
        assert!(raw.contains("\"latestNonce\""));
        assert!(raw.contains("\"attempts\""));
        assert!(raw.contains("\"won\""));
    }

    #[test]
    fn test_file_store_round_trip() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("hashle_store_test_{unique}"));
        let store = FileStore::new(&dir);
        assert_eq!(load_progress(&store, 2), None);
        let snapshot = sample_snapshot();
        save_progress(&store, 2, &snapshot);
        assert_eq!(load_progress(&store, 2), Some(snapshot));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
