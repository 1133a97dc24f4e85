//! FILENAME: core/engine/src/sort.rs
//! Multi-Column Sort Comparator.
//!
//! Sort specs are evaluated left to right as a tie-break chain. Columns that
//! translate their values or carry a custom value function compare by the
//! resolved display value; all others compare by the raw field. A null value
//! always sorts before a non-null value for the same key, whatever the
//! direction. Ties beyond every spec keep the rows' original order.

use std::cmp::Ordering;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::cell::CellValue;
use crate::column::ColumnConfig;
use crate::path::resolve_cell;
use crate::table::TableConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// +1 (or any non-negative value) is ascending, -1 descending.
    pub fn from_sign(sign: i8) -> Self {
        if sign < 0 {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    pub fn sign(self) -> i8 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        SortSpec {
            field: field.into(),
            order,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Descending)
    }
}

/// One comparable value per sort spec; most sorts use only a few keys.
type SortKey = SmallVec<[CellValue; 4]>;

/// Compares two key tuples under `specs`.
pub fn compare_keys(a: &[CellValue], b: &[CellValue], specs: &[SortSpec]) -> Ordering {
    for ((va, vb), spec) in a.iter().zip(b).zip(specs) {
        let ordering = match (va.is_null(), vb.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => match spec.order {
                SortOrder::Ascending => va.compare(vb),
                SortOrder::Descending => vb.compare(va),
            },
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

impl TableConfig {
    /// Compares two rows under `specs`.
    pub fn compare_rows(&self, a: &Value, b: &Value, specs: &[SortSpec]) -> Ordering {
        let columns = self.sort_columns(specs);
        let ka = self.sort_key(a, specs, &columns);
        let kb = self.sort_key(b, specs, &columns);
        compare_keys(&ka, &kb, specs)
    }

    /// Returns the row indices of `rows` in sorted order. The rows themselves
    /// are not moved, so side-tables keyed by row index stay valid.
    pub fn sort_permutation(&self, rows: &[Value], specs: &[SortSpec]) -> Vec<usize> {
        debug!("sort: rows={} specs={}", rows.len(), specs.len());
        let columns = self.sort_columns(specs);
        warn_uncached(&columns);

        let keys: Vec<SortKey> = rows
            .iter()
            .map(|row| self.sort_key(row, specs, &columns))
            .collect();
        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.sort_by(|&a, &b| compare_keys(&keys[a], &keys[b], specs).then(a.cmp(&b)));
        order
    }

    /// Sorts `rows` in place.
    pub fn sort_rows(&self, rows: &mut Vec<Value>, specs: &[SortSpec]) {
        let order = self.sort_permutation(rows, specs);
        let mut taken: Vec<Option<Value>> = rows.drain(..).map(Some).collect();
        rows.extend(order.into_iter().filter_map(|i| taken[i].take()));
    }

    /// The value sort and filter compare for `field`: the display value for
    /// translated/custom columns, the raw field otherwise.
    pub fn comparable_value(&self, row: &Value, field: &str) -> CellValue {
        self.comparable_value_for(row, field, self.column_by_field(field))
    }

    fn comparable_value_for(&self, row: &Value, field: &str, column: Option<&ColumnConfig>) -> CellValue {
        match column {
            Some(column) if column.uses_display_value() => self.resolve(row, column),
            Some(column) => resolve_cell(row, &column.field),
            None => resolve_cell(row, field),
        }
    }

    fn sort_columns(&self, specs: &[SortSpec]) -> Vec<Option<&ColumnConfig>> {
        specs.iter().map(|spec| self.column_by_field(&spec.field)).collect()
    }

    fn sort_key(&self, row: &Value, specs: &[SortSpec], columns: &[Option<&ColumnConfig>]) -> SortKey {
        specs
            .iter()
            .zip(columns)
            .map(|(spec, column)| self.comparable_value_for(row, &spec.field, *column))
            .collect()
    }
}

pub(crate) fn warn_uncached(columns: &[Option<&ColumnConfig>]) {
    for column in columns.iter().flatten() {
        if column.translate_values.is_enabled() && column.field_translated.is_none() {
            warn!(
                "'{}' is compared before the translated-value cache was built",
                column.field
            );
        }
    }
}
