//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Data grid configuration engine.
//! CONTEXT: Every table, tree table and record view is configured through a
//! `TableConfig`: an ordered list of column descriptors plus the services that
//! resolve cell values, cache translated text, sort, filter and produce
//! group/total text. Rows are arbitrary JSON documents owned by the caller;
//! the engine reads them by dot path and keeps derived data in side-tables.
//!
//! Layers:
//! - `column`: column descriptors (what a column IS)
//! - `table`: the ordered column list and its builder operations
//! - `resolver` / `format`: how a cell's display value is produced
//! - `translate` / `tree`: translated-value cache for flat and tree tables
//! - `sort` / `filter`: comparator, filter predicates, dropdown options
//! - `group`: subtotal and grand-total cell text

pub mod cell;
pub mod column;
pub mod error;
pub mod filter;
pub mod format;
pub mod group;
pub mod path;
pub mod resolver;
pub mod settings;
pub mod sort;
pub mod table;
pub mod translate;
pub mod tree;

// Re-export commonly used types at the crate root
pub use cell::{collate, CellValue};
pub use column::{
    ColumnConfig, ColumnGroupConfig, ColumnParams, DataType, FieldTextFn, FieldValueFn,
    FilterType, TranslateValue, ValueStrategy, FILTER_SHADOW_SUFFIX, TRANSLATED_SUFFIX,
};
pub use error::GridError;
pub use filter::{
    FilterPredicate, FilterRegistry, ShadowFields, FILTER_EQUALS_BY_DAY, FILTER_NONE,
    FILTER_SAME_OR_AFTER_BY_DAY, FILTER_SAME_OR_BEFORE_BY_DAY,
};
pub use format::{day_of, format_fraction, format_value};
pub use group::GroupData;
pub use path::{resolve_cell, resolve_path};
pub use settings::FormatSettings;
pub use sort::{compare_keys, SortOrder, SortSpec};
pub use table::TableConfig;
pub use translate::{TranslatedValueCache, Translations};
pub use tree::{breadth_first, BreadthFirst, TreeNode};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integration_test_load_translate_sort_workflow() {
        let mut table = TableConfig::new(FormatSettings::for_locale("de-CH"));
        table
            .add_column(DataType::String, "security.name", "NAME", true, true, None)
            .unwrap();
        table
            .add_column(
                DataType::String,
                "transactionType",
                "TRANSACTION_TYPE",
                true,
                true,
                Some(ColumnParams::new().translate(TranslateValue::UpperCase)),
            )
            .unwrap();

        let rows = vec![
            json!({"security": {"name": "Nestle"}, "transactionType": "sell"}),
            json!({"security": {"name": "ABB"}, "transactionType": "buy"}),
            json!({"security": {"name": "Roche"}, "transactionType": "dividend"}),
        ];

        let keys = table.translation_keys(&rows);
        assert!(keys.contains(&"BUY".to_string()));

        table.set_translations(Translations::with_entries(
            "de",
            [("BUY", "Kauf"), ("SELL", "Verkauf"), ("DIVIDEND", "Dividende")],
        ));
        table.build_translated_cache(&rows);

        let order = table.sort_permutation(&rows, &[SortSpec::ascending("transactionType$")]);
        assert_eq!(order, vec![2, 1, 0]);

        let column = table.column_by_field("transactionType").unwrap();
        assert_eq!(table.resolve_text(&rows[0], column), "Verkauf");
    }
}
