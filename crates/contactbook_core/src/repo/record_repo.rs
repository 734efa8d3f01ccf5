//! Record repository contract and JSON-file implementation.
//!
//! # Responsibility
//! - Read the whole backing file into memory at startup.
//! - Rewrite the whole backing file after every mutation.
//!
//! # Invariants
//! - The file holds a single JSON array of `{name, address, phone_number}`.
//! - Writes go to a sibling temp file that is renamed over the target, so an
//!   interrupted save leaves the previous content intact.
//! - Read paths reject malformed persisted data instead of masking it.

use crate::model::record::{to_pretty_json, Record};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for loading and saving the record collection.
#[derive(Debug)]
pub enum RepoError {
    /// Backing file exists but could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// Backing file content is not a valid record array.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Collection could not be encoded.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot access `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid record data in `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode records: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Parsed from an existing backing file.
    File,
    /// Backing file did not exist; collection starts empty.
    Missing,
}

/// Result of a full collection load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub origin: LoadOrigin,
}

/// Repository interface for whole-collection persistence.
pub trait RecordRepository {
    /// Reads the full persisted collection.
    fn load_all(&self) -> RepoResult<LoadedRecords>;
    /// Replaces the persisted collection with `records`.
    fn save_all(&self, records: &[Record]) -> RepoResult<()>;
    /// Human-readable location of the backing storage.
    fn location(&self) -> &Path;
}

/// JSON-file-backed record repository.
#[derive(Debug, Clone)]
pub struct JsonFileRecordRepository {
    path: PathBuf,
}

impl JsonFileRecordRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordRepository for JsonFileRecordRepository {
    fn load_all(&self) -> RepoResult<LoadedRecords> {
        let started_at = Instant::now();

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "event=store_load module=repo status=missing duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(LoadedRecords {
                    records: Vec::new(),
                    origin: LoadOrigin::Missing,
                });
            }
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error error_code=read_failed error={}",
                    err
                );
                return Err(RepoError::Io {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        let records = serde_json::from_str::<Vec<Record>>(&content).map_err(|err| {
            error!(
                "event=store_load module=repo status=error error_code=parse_failed line={} column={}",
                err.line(),
                err.column()
            );
            RepoError::Parse {
                path: self.path.clone(),
                source: err,
            }
        })?;

        info!(
            "event=store_load module=repo status=ok records={} duration_ms={}",
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(LoadedRecords {
            records,
            origin: LoadOrigin::File,
        })
    }

    fn save_all(&self, records: &[Record]) -> RepoResult<()> {
        let started_at = Instant::now();
        let json = to_pretty_json(records).map_err(RepoError::Encode)?;

        let temp_path = self.temp_path();
        let write_result =
            fs::write(&temp_path, json).and_then(|()| fs::rename(&temp_path, &self.path));

        if let Err(err) = write_result {
            // Best effort; the original file is untouched either way.
            let _ = fs::remove_file(&temp_path);
            error!(
                "event=store_save module=repo status=error error_code=write_failed error={}",
                err
            );
            return Err(RepoError::Io {
                path: self.path.clone(),
                source: err,
            });
        }

        info!(
            "event=store_save module=repo status=ok records={} duration_ms={}",
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::JsonFileRecordRepository;
    use std::path::PathBuf;

    #[test]
    fn temp_path_is_sibling_of_target() {
        let repo = JsonFileRecordRepository::new("data/personal_data.json");
        assert_eq!(
            repo.temp_path(),
            PathBuf::from("data/personal_data.json.tmp")
        );
    }
}
