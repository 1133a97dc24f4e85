//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the grid-engine integration tests.

#![allow(dead_code)]

use grid_engine::{
    ColumnParams, DataType, FilterType, FormatSettings, TableConfig, TranslateValue, Translations,
};
use serde_json::{json, Value};

/// Transaction list fixture: a table configured like a typical record view.
pub struct TransactionFixture;

impl TransactionFixture {
    pub fn table() -> TableConfig {
        let mut table = TableConfig::new(FormatSettings::for_locale("de-CH"));
        table
            .add_column(
                DataType::DateString,
                "transactionTime",
                "TRANSACTION_TIME",
                true,
                false,
                Some(ColumnParams::new().filter(FilterType::LikeDataType)),
            )
            .unwrap();
        table
            .add_column(
                DataType::String,
                "transactionType",
                "TRANSACTION_TYPE",
                true,
                true,
                Some(
                    ColumnParams::new()
                        .translate(TranslateValue::UpperCase)
                        .filter(FilterType::WithOptions),
                ),
            )
            .unwrap();
        table
            .add_column(
                DataType::String,
                "security.name",
                "NAME",
                true,
                true,
                Some(ColumnParams::new().filter(FilterType::WithOptions)),
            )
            .unwrap();
        table
            .add_column(DataType::Numeric, "units", "QUANTITY", true, true, None)
            .unwrap();
        table
            .add_column(
                DataType::Numeric,
                "cashaccountAmount",
                "TOTAL_AMOUNT",
                true,
                true,
                Some(ColumnParams::new().fraction_digits(2, 2)),
            )
            .unwrap();
        table
            .add_column(DataType::String, "note", "NOTE", false, true, Some(ColumnParams::new().export(false)))
            .unwrap();
        table
    }

    pub fn translations_de() -> Translations {
        Translations::with_entries(
            "de",
            [
                ("BUY", "Kauf"),
                ("SELL", "Verkauf"),
                ("DIVIDEND", "Dividende"),
                ("NAME", "Name"),
                ("QUANTITY", "Stück"),
            ],
        )
    }

    pub fn translations_en() -> Translations {
        Translations::with_entries(
            "en",
            [("BUY", "Buy"), ("SELL", "Sell"), ("DIVIDEND", "Dividend"), ("NAME", "Name")],
        )
    }

    pub fn rows() -> Vec<Value> {
        vec![
            json!({
                "idTransaction": 1,
                "transactionTime": "2024-03-01",
                "transactionType": "buy",
                "security": {"name": "Nestle"},
                "units": 10,
                "cashaccountAmount": -1050.5
            }),
            json!({
                "idTransaction": 2,
                "transactionTime": "2024-05-10",
                "transactionType": "dividend",
                "security": {"name": "Nestle"},
                "units": null,
                "cashaccountAmount": 28.0
            }),
            json!({
                "idTransaction": 3,
                "transactionTime": "2024-06-15",
                "transactionType": "sell",
                "security": {"name": "ABB"},
                "units": 5,
                "cashaccountAmount": 2400.0
            }),
            json!({
                "idTransaction": 4,
                "transactionTime": "2024-01-20",
                "transactionType": "buy",
                "security": {"name": "abb"},
                "units": 7,
                "cashaccountAmount": -3100.0
            }),
            json!({
                "idTransaction": 5,
                "transactionTime": "2024-02-02",
                "transactionType": "interest",
                "security": null,
                "cashaccountAmount": 1.25
            }),
        ]
    }
}

pub fn ids(rows: &[Value], order: &[usize]) -> Vec<i64> {
    order
        .iter()
        .map(|&i| rows[i]["idTransaction"].as_i64().unwrap())
        .collect()
}
