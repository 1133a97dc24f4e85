//! FILENAME: core/persistence/src/lib.rs
//! Grid Persistence Module
//!
//! Saves and restores per-user column visibility. Stored maps are keyed by a
//! structural checksum of the column set so that a backend schema change
//! invalidates them instead of hiding the wrong columns.

mod checksum;
mod error;
mod store;
mod visibility;

pub use checksum::{column_checksum, strip_locale_suffix};
pub use error::PersistenceError;
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use visibility::{
    checksum_key, table_checksum, RestoreOutcome, VisibilityPersistence, CHECKSUM_SUFFIX,
};
