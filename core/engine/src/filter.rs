//! FILENAME: core/engine/src/filter.rs
//! Filter Support - named predicates, dropdown options and date shadow fields.
//!
//! The host's filtering layer evaluates predicates per row; this module only
//! registers them, derives dropdown option lists, and precomputes the
//! displayed date text so equality filters match what the user sees.

use std::fmt;
use std::sync::Arc;

use log::debug;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::cell::{collate, CellValue};
use crate::column::{ColumnConfig, FilterType};
use crate::error::GridError;
use crate::format::{day_of, format_value};
use crate::path::resolve_cell;
use crate::settings::FormatSettings;
use crate::sort::warn_uncached;
use crate::table::TableConfig;

pub const FILTER_EQUALS_BY_DAY: &str = "equalsByDay";
pub const FILTER_SAME_OR_BEFORE_BY_DAY: &str = "sameOrBeforeByDay";
pub const FILTER_SAME_OR_AFTER_BY_DAY: &str = "sameOrAfterByDay";
/// Matches every row.
pub const FILTER_NONE: &str = "noFilter";

/// `(candidate, filter_value) -> matches`. An absent or null filter value
/// always matches.
pub type FilterPredicate = Arc<dyn Fn(&CellValue, Option<&CellValue>) -> bool + Send + Sync>;

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Clone, Default)]
pub struct FilterRegistry {
    predicates: FxHashMap<String, FilterPredicate>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in day predicates and the pass-through filter.
    pub fn with_defaults(settings: &FormatSettings) -> Self {
        let mut registry = Self::new();
        registry.register_filters(settings);
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&CellValue, Option<&CellValue>) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    /// Installs `equalsByDay`, `sameOrBeforeByDay`, `sameOrAfterByDay` and
    /// `noFilter`. Days are taken in the settings' offset; time of day is ignored.
    pub fn register_filters(&mut self, settings: &FormatSettings) {
        self.register(FILTER_EQUALS_BY_DAY, by_day(settings, |o| o.is_eq()));
        self.register(FILTER_SAME_OR_BEFORE_BY_DAY, by_day(settings, |o| o.is_le()));
        self.register(FILTER_SAME_OR_AFTER_BY_DAY, by_day(settings, |o| o.is_ge()));
        self.register(FILTER_NONE, |_: &CellValue, _: Option<&CellValue>| true);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FilterPredicate> {
        self.predicates.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.predicates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn matches(
        &self,
        name: &str,
        candidate: &CellValue,
        filter_value: Option<&CellValue>,
    ) -> Result<bool, GridError> {
        let predicate = self
            .predicates
            .get(name)
            .ok_or_else(|| GridError::UnknownFilter(name.to_string()))?;
        Ok(predicate(candidate, filter_value))
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("predicates", &self.names())
            .finish()
    }
}

fn by_day(
    settings: &FormatSettings,
    accept: fn(std::cmp::Ordering) -> bool,
) -> impl Fn(&CellValue, Option<&CellValue>) -> bool + Send + Sync + 'static {
    let settings = settings.clone();
    move |candidate: &CellValue, filter_value: Option<&CellValue>| {
        let Some(filter_value) = filter_value.filter(|v| !v.is_null()) else {
            return true;
        };
        match (day_of(candidate, &settings), day_of(filter_value, &settings)) {
            (Some(day), Some(target)) => accept(day.cmp(&target)),
            _ => false,
        }
    }
}

// ============================================================================
// SHADOW FIELDS
// ============================================================================

/// Derived per-row values keyed by shadow field name (`field_filter`) and
/// row index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadowFields {
    fields: FxHashMap<String, Vec<Option<String>>>,
}

impl ShadowFields {
    pub fn get(&self, shadow_field: &str, row_index: usize) -> Option<&str> {
        self.fields
            .get(shadow_field)
            .and_then(|values| values.get(row_index))
            .and_then(Option::as_deref)
    }

    pub fn values(&self, shadow_field: &str) -> Option<&[Option<String>]> {
        self.fields.get(shadow_field).map(Vec::as_slice)
    }

    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// TABLE OPERATIONS
// ============================================================================

impl TableConfig {
    /// Fills `filter_values` for every dropdown-filtered column: the distinct
    /// resolved values in case-insensitive order, preceded by an empty "any"
    /// option. Only exact duplicates are merged, so `ABB` and `abb` are two
    /// options because they match different rows.
    pub fn derive_filter_options(&mut self, rows: &[Value]) {
        let derived: Vec<(usize, Vec<String>)> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.filter_type == FilterType::WithOptions)
            .map(|(i, c)| (i, self.filter_options_for(rows, c)))
            .collect();

        for (index, options) in derived {
            let column = &mut self.columns[index];
            debug!("filter options: field={} options={}", column.field, options.len());
            column.filter_values = Some(options);
        }
    }

    fn filter_options_for(&self, rows: &[Value], column: &ColumnConfig) -> Vec<String> {
        warn_uncached(&[Some(column)]);
        let mut values: Vec<String> = rows
            .iter()
            .map(|row| self.resolve_text(row, column))
            .filter(|text| !text.is_empty())
            .collect();
        values.sort_by(|a, b| collate(a, b));
        values.dedup();
        values.insert(0, String::new());
        values
    }

    /// Computes the displayed date text of every filter-enabled date column
    /// for each row, addressed by `field_filter` and the row's index in `rows`.
    pub fn attach_filter_shadow_fields(&self, rows: &[Value]) -> ShadowFields {
        let mut shadow = ShadowFields::default();
        for column in self
            .columns
            .iter()
            .filter(|c| c.data_type.is_date() && c.filter_type != FilterType::None)
        {
            let values = rows
                .iter()
                .map(|row| {
                    let raw = resolve_cell(row, &column.field);
                    match format_value(&raw, column, &self.settings) {
                        CellValue::Null => None,
                        formatted => Some(formatted.display()),
                    }
                })
                .collect();
            shadow.fields.insert(column.filter_shadow_field(), values);
        }
        shadow
    }

    /// Indices of the rows whose value for `field` satisfies the named filter.
    pub fn filter_rows(
        &self,
        registry: &FilterRegistry,
        rows: &[Value],
        field: &str,
        filter_name: &str,
        filter_value: Option<&CellValue>,
    ) -> Result<Vec<usize>, GridError> {
        let predicate = registry
            .get(filter_name)
            .ok_or_else(|| GridError::UnknownFilter(filter_name.to_string()))?;

        Ok(rows
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate(&self.comparable_value(row, field), filter_value))
            .map(|(i, _)| i)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnParams, DataType};
    use serde_json::json;

    #[test]
    fn test_default_registry() {
        let registry = FilterRegistry::with_defaults(&FormatSettings::default());
        assert_eq!(
            registry.names(),
            vec![FILTER_EQUALS_BY_DAY, FILTER_NONE, FILTER_SAME_OR_AFTER_BY_DAY, FILTER_SAME_OR_BEFORE_BY_DAY]
        );
        assert!(registry.matches(FILTER_NONE, &CellValue::Null, Some(&"x".into())).unwrap());
    }

    #[test]
    fn test_unknown_filter() {
        let registry = FilterRegistry::new();
        let result = registry.matches("contains", &CellValue::Null, None);
        assert!(matches!(result, Err(GridError::UnknownFilter(name)) if name == "contains"));
    }

    #[test]
    fn test_null_filter_value_always_matches() {
        let registry = FilterRegistry::with_defaults(&FormatSettings::default());
        for name in [FILTER_EQUALS_BY_DAY, FILTER_SAME_OR_BEFORE_BY_DAY, FILTER_SAME_OR_AFTER_BY_DAY] {
            assert!(registry.matches(name, &"garbage".into(), None).unwrap());
            assert!(registry.matches(name, &CellValue::Null, Some(&CellValue::Null)).unwrap());
        }
    }

    #[test]
    fn test_day_predicates_ignore_time() {
        let registry = FilterRegistry::with_defaults(&FormatSettings::default());
        let target = CellValue::from("2024-06-15");
        let late = CellValue::from("2024-06-15T23:59:59");
        let next = CellValue::from("2024-06-16T00:00");

        assert!(registry.matches(FILTER_EQUALS_BY_DAY, &late, Some(&target)).unwrap());
        assert!(!registry.matches(FILTER_EQUALS_BY_DAY, &next, Some(&target)).unwrap());
        assert!(registry.matches(FILTER_SAME_OR_AFTER_BY_DAY, &next, Some(&target)).unwrap());
        assert!(!registry.matches(FILTER_SAME_OR_BEFORE_BY_DAY, &next, Some(&target)).unwrap());
        assert!(!registry.matches(FILTER_EQUALS_BY_DAY, &CellValue::Null, Some(&target)).unwrap());
    }

    #[test]
    fn test_shadow_fields_for_date_columns() {
        let mut table = TableConfig::new(FormatSettings::for_locale("de-CH"));
        table
            .add_column(
                DataType::DateString,
                "valuta",
                "VALUTA",
                true,
                true,
                Some(ColumnParams::new().filter(FilterType::LikeDataType)),
            )
            .unwrap();
        table
            .add_column(DataType::DateString, "created", "CREATED", true, true, None)
            .unwrap();

        let rows = vec![json!({"valuta": "2024-06-15"}), json!({})];
        let shadow = table.attach_filter_shadow_fields(&rows);
        assert_eq!(shadow.field_names(), vec!["valuta_filter"]);
        assert_eq!(shadow.get("valuta_filter", 0), Some("15.06.2024"));
        assert_eq!(shadow.get("valuta_filter", 1), None);
        assert_eq!(shadow.get("valuta_filter", 7), None);
    }
}
