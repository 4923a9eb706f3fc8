//! Bounded, most-recent-first history of past ingestions.
//!
//! The store owns its entries and exposes mutation only through `&mut self`,
//! so exclusive access is enforced by the borrow checker; callers sharing a
//! store across threads wrap it in a `Mutex` and the insert-then-evict
//! sequence stays a critical section.
//!
//! Durability is a property of the injected [`HistoryRepository`], not of the
//! store itself: one deployment persists every upload, another keeps history
//! purely in memory. In best-effort mode a failing repository is logged and
//! the in-memory bounded history stays consistent.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{error::IngestError, summary::Summary};

/// Maximum number of retained uploads; older entries are evicted.
pub const HISTORY_CAPACITY: usize = 5;

/// One successful ingestion: never mutated, destroyed only by eviction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub summary: Summary,
}

/// Persistence port for history entries. Implementations store the full
/// newest-first entry list on every save; the store never asks for deltas.
pub trait HistoryRepository {
    fn load(&self) -> Result<Vec<HistoryEntry>, IngestError>;
    fn save(&self, entries: &[HistoryEntry]) -> Result<(), IngestError>;
}

/// Keeps history only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryRepository;

impl HistoryRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<HistoryEntry>, IngestError> {
        Ok(Vec::new())
    }

    fn save(&self, _entries: &[HistoryEntry]) -> Result<(), IngestError> {
        Ok(())
    }
}

/// Persists history as a JSON array in a single file. A missing file reads
/// as an empty history.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<HistoryEntry>, IngestError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path).map_err(|err| {
            IngestError::Persistence(format!("opening {:?}: {err}", self.path))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|err| {
            IngestError::Persistence(format!("parsing history JSON {:?}: {err}", self.path))
        })
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), IngestError> {
        let file = File::create(&self.path).map_err(|err| {
            IngestError::Persistence(format!("creating {:?}: {err}", self.path))
        })?;
        serde_json::to_writer_pretty(file, entries).map_err(|err| {
            IngestError::Persistence(format!("writing history JSON {:?}: {err}", self.path))
        })
    }
}

/// How a repository failure during [`HistoryStore::record`] is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// Log the persistence failure and keep going; in-memory history stays
    /// authoritative for the rest of the process.
    BestEffort,
    /// Propagate the persistence failure to the caller.
    Strict,
}

/// Ordered, size-bounded collection of past ingestion results.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    repository: Box<dyn HistoryRepository>,
    durability: Durability,
}

impl HistoryStore {
    /// Builds a store by loading persisted entries. Entries are ordered
    /// newest-first and clamped to [`HISTORY_CAPACITY`] regardless of what
    /// the repository returns.
    pub fn open(
        repository: Box<dyn HistoryRepository>,
        durability: Durability,
    ) -> Result<Self, IngestError> {
        let mut entries = repository.load()?;
        entries.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        entries.truncate(HISTORY_CAPACITY);
        Ok(Self {
            entries,
            repository,
            durability,
        })
    }

    /// Inserts at the head, then evicts from the tail until the capacity
    /// invariant holds. Under exclusively head-insertion this keeps exactly
    /// the most recently recorded entries.
    pub fn record(&mut self, entry: HistoryEntry) -> Result<(), IngestError> {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        match self.repository.save(&self.entries) {
            Ok(()) => Ok(()),
            Err(err) => match self.durability {
                Durability::BestEffort => {
                    warn!("history not persisted: {err}");
                    Ok(())
                }
                Durability::Strict => Err(err),
            },
        }
    }

    /// Returns at most `limit` entries, newest first. `None` means the full
    /// capacity; asking for more than available returns all available.
    pub fn list(&self, limit: Option<usize>) -> &[HistoryEntry] {
        let limit = limit.unwrap_or(HISTORY_CAPACITY).min(self.entries.len());
        &self.entries[..limit]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
