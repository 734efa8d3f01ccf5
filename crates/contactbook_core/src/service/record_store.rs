//! Record store use-case service.
//!
//! # Responsibility
//! - Load the collection once at construction.
//! - Append records and persist the full collection after each append.
//!
//! # Invariants
//! - The collection is only ever appended to.
//! - After a successful `add_record`, storage reflects the full in-memory
//!   collection.

use crate::model::record::Record;
use crate::query::filter::{filter_records, QueryResult};
use crate::render::display::{display_records, DisplayOutput};
use crate::render::serialize::{serialize_records, RenderResult};
use crate::repo::record_repo::{
    JsonFileRecordRepository, LoadOrigin, RecordRepository, RepoResult,
};
use log::info;
use std::path::{Path, PathBuf};

/// In-memory record collection backed by a repository.
pub struct RecordStore<R: RecordRepository> {
    repo: R,
    records: Vec<Record>,
    origin: LoadOrigin,
}

impl RecordStore<JsonFileRecordRepository> {
    /// Loads the JSON file at `path`, or starts empty when it does not exist.
    ///
    /// # Errors
    /// - Returns `RepoError::Io` when the file exists but cannot be read.
    /// - Returns `RepoError::Parse` when the file is not a record array.
    pub fn load(path: impl Into<PathBuf>) -> RepoResult<Self> {
        Self::open(JsonFileRecordRepository::new(path))
    }
}

impl<R: RecordRepository> RecordStore<R> {
    /// Creates a store by loading everything from `repo`.
    pub fn open(repo: R) -> RepoResult<Self> {
        let loaded = repo.load_all()?;
        Ok(Self {
            repo,
            records: loaded.records,
            origin: loaded.origin,
        })
    }

    /// Appends one record and rewrites storage.
    ///
    /// The record stays in memory even when the save fails, so a retry via
    /// [`RecordStore::save`] persists it.
    pub fn add_record(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> RepoResult<()> {
        self.records.push(Record::new(name, address, phone_number));
        info!(
            "event=record_add module=service status=ok records={}",
            self.records.len()
        );
        self.save()
    }

    /// Writes the full collection to storage.
    pub fn save(&self) -> RepoResult<()> {
        self.repo.save_all(&self.records)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns whether construction found no backing file.
    pub fn started_empty(&self) -> bool {
        self.origin == LoadOrigin::Missing
    }

    pub fn location(&self) -> &Path {
        self.repo.location()
    }

    pub fn filter(&self, query: &str) -> QueryResult<Vec<&Record>> {
        filter_records(&self.records, query)
    }

    pub fn serialize(&self, format: &str) -> RenderResult<String> {
        serialize_records(&self.records, format)
    }

    pub fn display(&self, format: &str) -> DisplayOutput {
        display_records(&self.records, format)
    }
}
