//! Core domain logic for the contactbook record store.
//! This crate owns persistence, filtering and rendering of contact records.

pub mod logging;
pub mod model;
pub mod query;
pub mod render;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{to_pretty_json, Record, RECORD_FIELDS};
pub use query::filter::{filter_records, Condition, FilterQuery, QueryError, QueryResult};
pub use render::display::{
    display_records, DisplayFormat, DisplayOutput, UNSUPPORTED_DISPLAY_MESSAGE,
};
pub use render::serialize::{serialize_records, RenderError, RenderResult, SerializeFormat};
pub use repo::record_repo::{
    JsonFileRecordRepository, LoadOrigin, LoadedRecords, RecordRepository, RepoError, RepoResult,
};
pub use service::record_store::RecordStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
