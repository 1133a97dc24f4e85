//! FILENAME: core/engine/src/group.rs
//! PURPOSE: Text of subtotal and grand-total cells.
//! CONTEXT: Aggregate rows are rendered from a column's `column_group_configs`
//! instead of its per-row value. The aggregated numbers arrive either as an
//! object (read by path directly) or as buckets keyed by group key.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::cell::CellValue;
use crate::column::{ColumnConfig, ColumnGroupConfig};
use crate::format::format_value;
use crate::path::resolve_cell;
use crate::table::TableConfig;

/// Where a group row's aggregated values live.
#[derive(Debug, Clone, Copy)]
pub enum GroupData<'a> {
    /// A single object; `field_value` paths are read from it directly.
    Object(&'a Value),
    /// Pre-aggregated buckets; the group key selects the bucket first.
    Keyed(&'a FxHashMap<String, Value>),
}

impl GroupData<'_> {
    pub fn value_at(&self, key: &str, path: &str) -> CellValue {
        match self {
            GroupData::Object(value) => resolve_cell(value, path),
            GroupData::Keyed(buckets) => buckets
                .get(key)
                .map_or(CellValue::Null, |bucket| resolve_cell(bucket, path)),
        }
    }
}

impl TableConfig {
    /// Text for `column` in the group row at `group_index`. A configured text
    /// function produces the whole text; otherwise the translated label and
    /// the formatted value are joined by a single space.
    pub fn group_cell_text(
        &self,
        column: &ColumnConfig,
        group_index: usize,
        data: &GroupData<'_>,
        key: &str,
    ) -> String {
        let Some(config) = column.column_group_configs.get(group_index) else {
            return String::new();
        };
        if let Some(text_fn) = &config.field_text_fn {
            return text_fn(column, group_index, data, key);
        }

        let label = config
            .text_value_key
            .as_deref()
            .map(|k| self.translations.get(k).unwrap_or(k))
            .unwrap_or_default();
        let value = self.group_value_text(column, config, data, key);

        match (label.is_empty(), value.is_empty()) {
            (false, false) => format!("{} {}", label, value),
            (false, true) => label.to_string(),
            _ => value,
        }
    }

    /// True when the formatted group value starts with a minus sign.
    pub fn is_group_value_negative(
        &self,
        column: &ColumnConfig,
        group_index: usize,
        data: &GroupData<'_>,
        key: &str,
    ) -> bool {
        column
            .column_group_configs
            .get(group_index)
            .is_some_and(|config| self.group_value_text(column, config, data, key).starts_with('-'))
    }

    fn group_value_text(
        &self,
        column: &ColumnConfig,
        config: &ColumnGroupConfig,
        data: &GroupData<'_>,
        key: &str,
    ) -> String {
        config
            .field_value
            .as_deref()
            .map(|path| format_value(&data.value_at(key, path), column, &self.settings).display())
            .unwrap_or_default()
    }
}
