//! FILENAME: core/persistence/src/visibility.rs
//! PURPOSE: Save and restore which columns a user has hidden.
//! CONTEXT: The visibility map is stored under the caller's key and the
//! structural checksum under `key + ".checksum"`. The two writes are not
//! atomic; a mismatch on the next restore simply discards the map.

use crate::checksum::column_checksum;
use crate::store::SettingsStore;
use grid_engine::TableConfig;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

pub const CHECKSUM_SUFFIX: &str = ".checksum";

pub fn checksum_key(key: &str) -> String {
    format!("{}{}", key, CHECKSUM_SUFFIX)
}

/// Checksum over the table's current field set.
pub fn table_checksum(table: &TableConfig) -> String {
    column_checksum(
        table.columns().iter().map(|c| c.field.as_str()),
        &table.settings().supported_languages,
    )
}

/// What `restore` did with the stored settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The stored map matched the current column set; `columns` entries were
    /// applied.
    Applied { columns: usize },
    /// Nothing usable was stored, or the column set changed since the save.
    Discarded,
}

impl RestoreOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, RestoreOutcome::Applied { .. })
    }
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[derive(Debug)]
pub struct VisibilityPersistence<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> VisibilityPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Stores `{header_key: visible}` for every column plus the current
    /// checksum.
    pub fn save(&mut self, key: &str, table: &TableConfig) {
        let map: Map<String, Value> = table
            .columns()
            .iter()
            .map(|c| (c.header_key.clone(), Value::Bool(c.visible)))
            .collect();

        self.store.set(key, &Value::Object(map).to_string());
        self.store.set(&checksum_key(key), &table_checksum(table));
        debug!("Saved visibility for '{}' ({} columns)", key, table.len());
    }

    /// Applies the stored visibility map when the column set is unchanged.
    /// Otherwise the table keeps its defaults, the stored map is removed and
    /// the stored checksum is replaced with the current one.
    pub fn restore(&mut self, key: &str, table: &mut TableConfig) -> RestoreOutcome {
        let current = table_checksum(table);
        let stored = self.store.get(&checksum_key(key));

        if stored.as_deref() != Some(current.as_str()) {
            debug!(
                "Visibility checksum for '{}' changed ({:?} -> {}), discarding",
                key, stored, current
            );
            self.store.remove(key);
            self.store.set(&checksum_key(key), &current);
            return RestoreOutcome::Discarded;
        }

        let Some(raw) = self.store.get(key) else {
            return RestoreOutcome::Discarded;
        };

        let map: FxHashMap<String, bool> = match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!("Ignoring corrupt visibility settings for '{}': {}", key, e);
                return RestoreOutcome::Discarded;
            }
        };

        let mut applied = 0;
        for column in table.columns_mut() {
            if let Some(&visible) = map.get(&column.header_key) {
                column.visible = visible;
                applied += 1;
            }
        }

        debug!("Restored visibility for '{}' ({} columns)", key, applied);
        RestoreOutcome::Applied { columns: applied }
    }
}
