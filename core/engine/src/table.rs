//! FILENAME: core/engine/src/table.rs
//! PURPOSE: The table configuration: an ordered column list plus the state the
//! engine services share (format settings, translation dictionary, translated
//! value cache).
//! CONTEXT: A `TableConfig` is built once when a table is configured. Column
//! order is display order and changes only through the explicit
//! insert/splice/remove operations below. Resolution, caching, sorting,
//! filtering and group text are implemented as further `impl TableConfig`
//! blocks in their own modules.

use log::debug;

use crate::column::{ColumnConfig, ColumnParams, DataType};
use crate::error::GridError;
use crate::settings::FormatSettings;
use crate::translate::{TranslatedValueCache, Translations};

#[derive(Debug, Clone, Default)]
pub struct TableConfig {
    pub(crate) columns: Vec<ColumnConfig>,
    pub(crate) settings: FormatSettings,
    pub(crate) translations: Translations,
    pub(crate) value_cache: TranslatedValueCache,
}

impl TableConfig {
    pub fn new(settings: FormatSettings) -> Self {
        TableConfig {
            columns: Vec::new(),
            settings,
            translations: Translations::default(),
            value_cache: TranslatedValueCache::default(),
        }
    }

    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: FormatSettings) {
        self.settings = settings;
    }

    // ========================================================================
    // BUILDER
    // ========================================================================

    /// Appends a column and returns it for further adjustment.
    pub fn add_column(
        &mut self,
        data_type: DataType,
        field: &str,
        header_key: &str,
        visible: bool,
        change_visibility: bool,
        params: Option<ColumnParams>,
    ) -> Result<&mut ColumnConfig, GridError> {
        let index = self.columns.len();
        self.insert_column(index, data_type, field, header_key, visible, change_visibility, params)
    }

    /// Appends a column whose header key is derived from `field`.
    pub fn add_column_auto_header(
        &mut self,
        data_type: DataType,
        field: &str,
        visible: bool,
        change_visibility: bool,
        params: Option<ColumnParams>,
    ) -> Result<&mut ColumnConfig, GridError> {
        let header_key = self.header_key_from_field(field);
        self.add_column(data_type, field, &header_key, visible, change_visibility, params)
    }

    /// Inserts a column at `index` (clamped to the list length). Columns at or
    /// after `index` shift one place to the right.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_column(
        &mut self,
        index: usize,
        data_type: DataType,
        field: &str,
        header_key: &str,
        visible: bool,
        change_visibility: bool,
        params: Option<ColumnParams>,
    ) -> Result<&mut ColumnConfig, GridError> {
        if field.is_empty() {
            return Err(GridError::EmptyField);
        }

        let mut column = ColumnConfig::new(data_type, field, header_key, visible, change_visibility);
        if let Some(params) = params {
            column.apply_params(params);
        }

        let index = index.min(self.columns.len());
        self.columns.insert(index, column);
        Ok(&mut self.columns[index])
    }

    /// Removes up to `count` columns starting at `start` and returns them.
    pub fn splice_columns(&mut self, start: usize, count: usize) -> Vec<ColumnConfig> {
        let start = start.min(self.columns.len());
        let end = start.saturating_add(count).min(self.columns.len());
        self.columns.drain(start..end).collect()
    }

    /// Replaces the whole column list.
    pub fn set_column_config(&mut self, columns: Vec<ColumnConfig>) {
        debug!("set_column_config: {} columns", columns.len());
        self.columns = columns;
    }

    pub fn remove_all_columns(&mut self) {
        self.columns.clear();
    }

    /// Derives an upper-snake-case header key from a field path after removing
    /// the first matching configured prefix: `"security.nameDe"` becomes
    /// `"SECURITY_NAME_DE"`.
    pub fn header_key_from_field(&self, field: &str) -> String {
        let stripped = self
            .settings
            .header_strip_prefixes
            .iter()
            .find_map(|prefix| field.strip_prefix(prefix.as_str()))
            .unwrap_or(field);

        let mut key = String::with_capacity(stripped.len() + 4);
        let mut previous_lower = false;
        for c in stripped.chars() {
            if c == '.' {
                key.push('_');
                previous_lower = false;
                continue;
            }
            if c.is_uppercase() && previous_lower {
                key.push('_');
            }
            previous_lower = c.is_lowercase() || c.is_ascii_digit();
            key.extend(c.to_uppercase());
        }
        key
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    pub fn columns(&self) -> &[ColumnConfig] {
        &self.columns
    }

    /// Mutable access to each column without allowing reordering.
    pub fn columns_mut(&mut self) -> impl Iterator<Item = &mut ColumnConfig> {
        self.columns.iter_mut()
    }

    pub fn column(&self, index: usize) -> Option<&ColumnConfig> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Finds a column by `field` or by its translated cache name.
    pub fn column_by_field(&self, field: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.answers_to(field))
    }

    pub fn column_by_field_mut(&mut self, field: &str) -> Option<&mut ColumnConfig> {
        self.columns.iter_mut().find(|c| c.answers_to(field))
    }

    pub fn column_by_header_key(&self, header_key: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.header_key == header_key)
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnConfig> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn export_columns(&self) -> impl Iterator<Item = &ColumnConfig> {
        self.columns.iter().filter(|c| c.export)
    }

    /// Shows or hides the column with `header_key` when the user may toggle
    /// it. Returns whether the visibility changed.
    pub fn set_column_visible(&mut self, header_key: &str, visible: bool) -> bool {
        match self
            .columns
            .iter_mut()
            .find(|c| c.header_key == header_key && c.change_visibility)
        {
            Some(column) if column.visible != visible => {
                column.visible = visible;
                true
            }
            _ => false,
        }
    }
}
