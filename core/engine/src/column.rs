//! FILENAME: core/engine/src/column.rs
//! Column Descriptor - the configuration of one displayed column.
//!
//! A `ColumnConfig` says where a column's value lives in a row (`field`), how
//! it is formatted (`data_type`, fraction digits), whether raw values are enum
//! codes that need translating, how it filters, and how it takes part in
//! group/total rows. Descriptors are plain data: custom behavior is carried in
//! shared closures so a descriptor can be cloned into independent tables.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cell::CellValue;
use crate::group::GroupData;

/// Suffix appended to `field` to name the translated-value cache entry.
pub const TRANSLATED_SUFFIX: &str = "$";

/// Suffix appended to `field` to name a filter shadow field.
pub const FILTER_SHADOW_SUFFIX: &str = "_filter";

// ============================================================================
// DATA TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    String,
    Numeric,
    NumericInteger,
    NumericShowZero,
    NumericRaw,
    Boolean,
    DateString,
    DateNumeric,
    DateTimeNumeric,
    DateTimeSecondString,
}

impl DataType {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            DataType::Numeric
                | DataType::NumericInteger
                | DataType::NumericShowZero
                | DataType::NumericRaw
        )
    }

    pub fn is_date(self) -> bool {
        matches!(
            self,
            DataType::DateString
                | DataType::DateNumeric
                | DataType::DateTimeNumeric
                | DataType::DateTimeSecondString
        )
    }
}

/// Whether raw values are enum codes rendered through the translation dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TranslateValue {
    #[default]
    Off,
    Normal,
    /// The code is upper-cased before the dictionary lookup.
    UpperCase,
}

impl TranslateValue {
    pub fn is_enabled(self) -> bool {
        self != TranslateValue::Off
    }

    /// Dictionary key for a raw code, or `None` when translation is off.
    pub fn key_for(self, code: &str) -> Option<String> {
        match self {
            TranslateValue::Off => None,
            TranslateValue::Normal => Some(code.to_string()),
            TranslateValue::UpperCase => Some(code.to_uppercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    #[default]
    None,
    /// Free filter matching the column's data type.
    LikeDataType,
    /// Dropdown filter fed by `filter_values`.
    WithOptions,
}

// ============================================================================
// CUSTOM BEHAVIOR
// ============================================================================

/// Receives the row, the column and the default-resolved value; its result
/// replaces the default unconditionally.
pub type FieldValueFn = Arc<dyn Fn(&Value, &ColumnConfig, CellValue) -> CellValue + Send + Sync>;

/// Produces the whole text of a group/total cell.
pub type FieldTextFn = Arc<dyn Fn(&ColumnConfig, usize, &GroupData<'_>, &str) -> String + Send + Sync>;

/// How a column's display value is produced.
#[derive(Clone, Default)]
pub enum ValueStrategy {
    #[default]
    Default,
    Custom(FieldValueFn),
}

impl fmt::Debug for ValueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueStrategy::Default => f.write_str("Default"),
            ValueStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ============================================================================
// GROUP CONFIGURATION
// ============================================================================

/// How a column renders in one group/total row level.
#[derive(Clone, Default)]
pub struct ColumnGroupConfig {
    /// Path of the aggregated value inside the group data container.
    pub field_value: Option<String>,
    /// Translation key of the label shown before the value.
    pub text_value_key: Option<String>,
    /// Replaces label + value entirely when present.
    pub field_text_fn: Option<FieldTextFn>,
    pub colspan: Option<u32>,
}

impl ColumnGroupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_value(mut self, path: impl Into<String>) -> Self {
        self.field_value = Some(path.into());
        self
    }

    pub fn with_text_value_key(mut self, key: impl Into<String>) -> Self {
        self.text_value_key = Some(key.into());
        self
    }

    pub fn with_field_text_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ColumnConfig, usize, &GroupData<'_>, &str) -> String + Send + Sync + 'static,
    {
        self.field_text_fn = Some(Arc::new(f));
        self
    }

    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = Some(colspan);
        self
    }
}

impl fmt::Debug for ColumnGroupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnGroupConfig")
            .field("field_value", &self.field_value)
            .field("text_value_key", &self.text_value_key)
            .field("field_text_fn", &self.field_text_fn.as_ref().map(|_| ".."))
            .field("colspan", &self.colspan)
            .finish()
    }
}

// ============================================================================
// COLUMN DESCRIPTOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct ColumnConfig {
    pub data_type: DataType,
    /// Dot path into the row.
    pub field: String,
    pub header_key: String,
    /// Cached display label, filled by `TableConfig::translate_headers`.
    pub header_translated: Option<String>,
    pub visible: bool,
    /// Whether the user may toggle `visible`.
    pub change_visibility: bool,
    pub width: Option<u32>,
    /// Render hint, opaque to the engine.
    pub template_name: Option<String>,
    pub frozen_column: bool,
    /// Include in exports.
    pub export: bool,
    pub translate_values: TranslateValue,
    /// Set by the translated-value cache builder to `field + "$"`.
    pub field_translated: Option<String>,
    pub value_strategy: ValueStrategy,
    pub filter_type: FilterType,
    /// Dropdown options derived by `TableConfig::derive_filter_options`.
    pub filter_values: Option<Vec<String>>,
    pub max_fraction_digits: Option<u8>,
    pub min_fraction_digits: Option<u8>,
    pub column_group_configs: Vec<ColumnGroupConfig>,
}

impl ColumnConfig {
    pub fn new(
        data_type: DataType,
        field: impl Into<String>,
        header_key: impl Into<String>,
        visible: bool,
        change_visibility: bool,
    ) -> Self {
        ColumnConfig {
            data_type,
            field: field.into(),
            header_key: header_key.into(),
            header_translated: None,
            visible,
            change_visibility,
            width: None,
            template_name: None,
            frozen_column: false,
            export: true,
            translate_values: TranslateValue::Off,
            field_translated: None,
            value_strategy: ValueStrategy::Default,
            filter_type: FilterType::None,
            filter_values: None,
            max_fraction_digits: None,
            min_fraction_digits: None,
            column_group_configs: Vec::new(),
        }
    }

    /// Copies every present optional parameter onto the descriptor.
    pub fn apply_params(&mut self, params: ColumnParams) {
        if let Some(width) = params.width {
            self.width = Some(width);
        }
        if let Some(template_name) = params.template_name {
            self.template_name = Some(template_name);
        }
        if let Some(frozen) = params.frozen_column {
            self.frozen_column = frozen;
        }
        if let Some(export) = params.export {
            self.export = export;
        }
        if let Some(translate) = params.translate_values {
            self.translate_values = translate;
        }
        if let Some(f) = params.field_value_fn {
            self.value_strategy = ValueStrategy::Custom(f);
        }
        if let Some(filter_type) = params.filter_type {
            self.filter_type = filter_type;
        }
        if let Some(max) = params.max_fraction_digits {
            self.max_fraction_digits = Some(max);
        }
        if let Some(min) = params.min_fraction_digits {
            self.min_fraction_digits = Some(min);
        }
        if let Some(groups) = params.column_group_configs {
            self.column_group_configs = groups;
        }
    }

    pub fn translated_field_name(&self) -> String {
        format!("{}{}", self.field, TRANSLATED_SUFFIX)
    }

    pub fn filter_shadow_field(&self) -> String {
        format!("{}{}", self.field, FILTER_SHADOW_SUFFIX)
    }

    pub fn has_custom_value(&self) -> bool {
        matches!(self.value_strategy, ValueStrategy::Custom(_))
    }

    /// Sort and filter must read what the user sees rather than the raw field.
    pub fn uses_display_value(&self) -> bool {
        self.translate_values.is_enabled() || self.has_custom_value()
    }

    /// Translated header if available, otherwise the key itself.
    pub fn header_label(&self) -> &str {
        self.header_translated.as_deref().unwrap_or(&self.header_key)
    }

    /// True when `name` addresses this column by `field` or by its cache name.
    pub fn answers_to(&self, name: &str) -> bool {
        self.field == name || self.field_translated.as_deref() == Some(name)
    }
}

/// Optional parameters for `TableConfig::add_column`. Present values are
/// copied verbatim.
#[derive(Clone, Default)]
pub struct ColumnParams {
    pub width: Option<u32>,
    pub template_name: Option<String>,
    pub frozen_column: Option<bool>,
    pub export: Option<bool>,
    pub translate_values: Option<TranslateValue>,
    pub field_value_fn: Option<FieldValueFn>,
    pub filter_type: Option<FilterType>,
    pub max_fraction_digits: Option<u8>,
    pub min_fraction_digits: Option<u8>,
    pub column_group_configs: Option<Vec<ColumnGroupConfig>>,
}

impl ColumnParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    pub fn frozen(mut self) -> Self {
        self.frozen_column = Some(true);
        self
    }

    pub fn export(mut self, export: bool) -> Self {
        self.export = Some(export);
        self
    }

    pub fn translate(mut self, mode: TranslateValue) -> Self {
        self.translate_values = Some(mode);
        self
    }

    pub fn field_value_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &ColumnConfig, CellValue) -> CellValue + Send + Sync + 'static,
    {
        self.field_value_fn = Some(Arc::new(f));
        self
    }

    pub fn filter(mut self, filter_type: FilterType) -> Self {
        self.filter_type = Some(filter_type);
        self
    }

    pub fn fraction_digits(mut self, min: u8, max: u8) -> Self {
        self.min_fraction_digits = Some(min);
        self.max_fraction_digits = Some(max);
        self
    }

    pub fn group_configs(mut self, groups: Vec<ColumnGroupConfig>) -> Self {
        self.column_group_configs = Some(groups);
        self
    }
}

impl fmt::Debug for ColumnParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnParams")
            .field("width", &self.width)
            .field("template_name", &self.template_name)
            .field("translate_values", &self.translate_values)
            .field("field_value_fn", &self.field_value_fn.as_ref().map(|_| ".."))
            .field("filter_type", &self.filter_type)
            .finish_non_exhaustive()
    }
}
