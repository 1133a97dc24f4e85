//! FILENAME: core/engine/src/resolver.rs
//! PURPOSE: Resolves the display value of one cell.
//! CONTEXT: Called by the rendering layer for every visible cell and by the
//! sort/filter paths for columns whose order must follow what the user sees.
//! Steps: walk the field path, apply data-type formatting, substitute
//! translated text, then let a custom value function override the result.

use serde_json::Value;

use crate::cell::CellValue;
use crate::column::{ColumnConfig, ValueStrategy};
use crate::format::format_value;
use crate::path::resolve_cell;
use crate::table::TableConfig;

impl TableConfig {
    /// Display value of `column` for `row`. Never fails: missing path
    /// segments resolve to `Null` and missing translations keep the raw value.
    pub fn resolve(&self, row: &Value, column: &ColumnConfig) -> CellValue {
        let raw = resolve_cell(row, &column.field);
        let formatted = format_value(&raw, column, &self.settings);

        let value = if column.translate_values.is_enabled() {
            self.translated_value(column, &raw)
                .map_or(formatted, CellValue::Text)
        } else {
            formatted
        };

        match &column.value_strategy {
            ValueStrategy::Custom(f) => f(row, column, value),
            ValueStrategy::Default => value,
        }
    }

    /// `resolve` rendered as text.
    pub fn resolve_text(&self, row: &Value, column: &ColumnConfig) -> String {
        self.resolve(row, column).display()
    }

    /// Resolves by field name; `None` when no column answers to `field`.
    pub fn resolve_field(&self, row: &Value, field: &str) -> Option<CellValue> {
        self.column_by_field(field).map(|column| self.resolve(row, column))
    }

    /// Cached text when the cache has been built, otherwise a direct
    /// dictionary lookup. `None` when neither knows the code.
    fn translated_value(&self, column: &ColumnConfig, raw: &CellValue) -> Option<String> {
        if raw.is_null() {
            return None;
        }
        let code = raw.display();

        if let Some(cached) = column
            .field_translated
            .as_deref()
            .and_then(|field| self.value_cache.get(field, &code))
        {
            return Some(cached.to_string());
        }

        let key = column.translate_values.key_for(&code)?;
        self.translations.get(&key).map(str::to_string)
    }
}
