//! FILENAME: tests/test_filter.rs
//! Integration tests for filter predicates, dropdown options and shadow fields.

mod common;

use common::TransactionFixture;
use grid_engine::{
    CellValue, ColumnParams, DataType, FilterRegistry, FilterType, FormatSettings, GridError,
    TableConfig, FILTER_EQUALS_BY_DAY, FILTER_NONE, FILTER_SAME_OR_AFTER_BY_DAY,
    FILTER_SAME_OR_BEFORE_BY_DAY,
};
use serde_json::{json, Value};

fn timestamp_rows() -> Vec<Value> {
    vec![
        json!({"ts": "2024-06-14T23:00"}),
        json!({"ts": "2024-06-15T08:00"}),
        json!({"ts": "2024-06-16T01:00"}),
    ]
}

fn timestamp_table() -> TableConfig {
    let mut table = TableConfig::default();
    table
        .add_column(
            DataType::DateTimeSecondString,
            "ts",
            "TS",
            true,
            true,
            Some(ColumnParams::new().filter(FilterType::LikeDataType)),
        )
        .unwrap();
    table
}

// ============================================================================
// DROPDOWN OPTIONS
// ============================================================================

#[test]
fn test_filter_options_sorted_and_unique() {
    let mut table = TableConfig::default();
    table
        .add_column(
            DataType::String,
            "x",
            "X",
            true,
            true,
            Some(ColumnParams::new().filter(FilterType::WithOptions)),
        )
        .unwrap();
    let rows = vec![json!({"x": "b"}), json!({"x": "a"}), json!({"x": "a"})];
    table.derive_filter_options(&rows);
    assert_eq!(
        table.columns()[0].filter_values.as_deref(),
        Some(&["".to_string(), "a".to_string(), "b".to_string()][..])
    );
}

#[test]
fn test_filter_options_use_translated_text() {
    let mut table = TransactionFixture::table();
    let rows = TransactionFixture::rows();
    table.set_translations(TransactionFixture::translations_de());
    table.build_translated_cache(&rows);
    table.derive_filter_options(&rows);

    let types = table.column_by_field("transactionType").unwrap();
    assert_eq!(
        types.filter_values.clone().unwrap(),
        vec!["", "Dividende", "interest", "Kauf", "Verkauf"]
    );

    let names = table.column_by_field("security.name").unwrap();
    assert_eq!(names.filter_values.clone().unwrap(), vec!["", "ABB", "abb", "Nestle"]);

    // Columns without a dropdown filter are left alone
    assert!(table.column_by_field("units").unwrap().filter_values.is_none());
}

// ============================================================================
// DAY PREDICATES
// ============================================================================

#[test]
fn test_same_or_before_by_day() {
    let table = timestamp_table();
    let registry = FilterRegistry::with_defaults(table.settings());
    let rows = timestamp_rows();
    let target = CellValue::from("2024-06-15");

    let matched = table
        .filter_rows(&registry, &rows, "ts", FILTER_SAME_OR_BEFORE_BY_DAY, Some(&target))
        .unwrap();
    assert_eq!(matched, vec![0, 1]);

    let matched = table
        .filter_rows(&registry, &rows, "ts", FILTER_SAME_OR_AFTER_BY_DAY, Some(&target))
        .unwrap();
    assert_eq!(matched, vec![1, 2]);

    let matched = table
        .filter_rows(&registry, &rows, "ts", FILTER_EQUALS_BY_DAY, Some(&target))
        .unwrap();
    assert_eq!(matched, vec![1]);
}

#[test]
fn test_epoch_timestamps_use_configured_offset() {
    let settings = FormatSettings {
        utc_offset_minutes: 120,
        ..FormatSettings::default()
    };
    let mut table = TableConfig::new(settings);
    table
        .add_column(DataType::DateNumeric, "ts", "TS", true, true, None)
        .unwrap();
    let registry = FilterRegistry::with_defaults(table.settings());
    // 2024-06-14T23:00Z, 2024-06-15T21:00Z, 2024-06-15T22:30Z
    let rows = vec![
        json!({"ts": 1_718_406_000_000_i64}),
        json!({"ts": 1_718_485_200_000_i64}),
        json!({"ts": 1_718_490_600_000_i64}),
    ];
    let matched = table
        .filter_rows(
            &registry,
            &rows,
            "ts",
            FILTER_EQUALS_BY_DAY,
            Some(&CellValue::from("2024-06-15")),
        )
        .unwrap();
    assert_eq!(matched, vec![0, 1]);
}

#[test]
fn test_no_filter_and_absent_value_match_everything() {
    let table = timestamp_table();
    let registry = FilterRegistry::with_defaults(table.settings());
    let rows = timestamp_rows();

    let all = table
        .filter_rows(&registry, &rows, "ts", FILTER_NONE, Some(&CellValue::from("x")))
        .unwrap();
    assert_eq!(all, vec![0, 1, 2]);

    let all = table
        .filter_rows(&registry, &rows, "ts", FILTER_EQUALS_BY_DAY, None)
        .unwrap();
    assert_eq!(all, vec![0, 1, 2]);
}

#[test]
fn test_unknown_filter_is_an_error() {
    let table = timestamp_table();
    let registry = FilterRegistry::with_defaults(table.settings());
    let result = table.filter_rows(&registry, &[], "ts", "startsWith", None);
    assert!(matches!(result, Err(GridError::UnknownFilter(_))));
}

#[test]
fn test_custom_registered_predicate() {
    let table = TransactionFixture::table();
    let mut registry = FilterRegistry::with_defaults(table.settings());
    registry.register("greaterThan", |candidate: &CellValue, filter: Option<&CellValue>| {
        match (candidate.as_f64(), filter.and_then(CellValue::as_f64)) {
            (Some(c), Some(f)) => c > f,
            (_, None) => true,
            _ => false,
        }
    });

    let rows = TransactionFixture::rows();
    let matched = table
        .filter_rows(&registry, &rows, "units", "greaterThan", Some(&CellValue::Number(6.0)))
        .unwrap();
    assert_eq!(matched, vec![0, 3]);
}

// ============================================================================
// SHADOW FIELDS
// ============================================================================

#[test]
fn test_shadow_fields_hold_displayed_date() {
    let table = TransactionFixture::table();
    let rows = TransactionFixture::rows();
    let shadow = table.attach_filter_shadow_fields(&rows);

    assert_eq!(shadow.field_names(), vec!["transactionTime_filter"]);
    assert_eq!(shadow.get("transactionTime_filter", 2), Some("15.06.2024"));
    assert_eq!(shadow.values("transactionTime_filter").unwrap().len(), rows.len());
    // The caller's rows are untouched
    assert!(rows[2].get("transactionTime_filter").is_none());
}

#[test]
fn test_shadow_fields_for_date_time_column() {
    let table = timestamp_table();
    let shadow = table.attach_filter_shadow_fields(&timestamp_rows());
    assert_eq!(shadow.get("ts_filter", 0), Some("2024-06-14 23:00:00"));
}
