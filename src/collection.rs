//! Controller-owned bookmark store.
//!
//! The collection holds the canonical copy of every record. Edits made in
//! the card widget flow back here through the save callback; all
//! persistence failures are handled (logged) on this side and never reach
//! the widget.

use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use crate::record::Record;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Journal entry recorded for every applied save
#[derive(Debug, Clone)]
pub struct SaveReceipt {
    pub record_id: Uuid,
    pub title: String,
    pub saved_at: DateTime<Utc>,
}

/// In-memory bookmark collection, optionally backed by a JSON file
pub struct Collection {
    records: Vec<Record>,
    journal: Vec<SaveReceipt>,
    path: Option<PathBuf>,
    dry_run: bool,
}

impl Collection {
    /// Create a collection from records, without file backing
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            journal: Vec::new(),
            path: None,
            dry_run: false,
        }
    }

    /// Create a collection seeded with the built-in sample records
    pub fn with_samples() -> Self {
        Self::from_records(Record::sample_set())
    }

    /// Load a collection from a JSON file and keep it as the backing file
    pub fn load(path: &Path) -> CollectionResult<Self> {
        let content = fs::read_to_string(path)?;
        let records: Vec<Record> = serde_json::from_str(&content)?;
        tracing::info!("Loaded {} bookmarks from {}", records.len(), path.display());

        Ok(Self {
            records,
            journal: Vec::new(),
            path: Some(path.to_path_buf()),
            dry_run: false,
        })
    }

    /// Suppress all disk writes (edits still apply in memory)
    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn journal(&self) -> &[SaveReceipt] {
        &self.journal
    }

    pub fn last_receipt(&self) -> Option<&SaveReceipt> {
        self.journal.last()
    }

    /// Apply a save coming from the edit card.
    ///
    /// Replaces the canonical record matching the incoming id, journals a
    /// receipt and rewrites the backing file when there is one. The caller
    /// gets no result back: by the time this runs the card has already
    /// returned to view mode, so failures are logged and handled here.
    pub fn apply_save(&mut self, record: &Record) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => {
                tracing::warn!("Ignoring save for unknown record {}", record.id);
                return;
            }
        }

        self.journal.push(SaveReceipt {
            record_id: record.id,
            title: record.title.clone(),
            saved_at: Utc::now(),
        });
        tracing::info!("Saved bookmark \"{}\"", record.title);

        if self.dry_run {
            tracing::debug!("Dry run: not writing collection to disk");
            return;
        }

        if let Some(path) = self.path.clone() {
            if let Err(e) = self.persist_to(&path) {
                tracing::error!("Failed to persist collection to {}: {}", path.display(), e);
            }
        }
    }

    /// Write the collection to `path` and adopt it as the backing file
    pub fn save_as(&mut self, path: &Path) -> CollectionResult<()> {
        self.persist_to(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Atomically write all records as pretty JSON: temp file in the target
    /// directory, then rename over the destination
    fn persist_to(&self, path: &Path) -> CollectionResult<()> {
        let json = serde_json::to_string_pretty(&self.records)?;

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(path).map_err(|e| e.error)?;

        tracing::debug!("Wrote {} bookmarks to {}", self.records.len(), path.display());
        Ok(())
    }
}
