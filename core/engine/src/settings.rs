//! FILENAME: core/engine/src/settings.rs
//! PURPOSE: Locale and formatting configuration shared by every table.
//! CONTEXT: A `FormatSettings` value is loaded once from the user's profile
//! (or built from a locale preset) and handed to each `TableConfig`. Every
//! field has a default so partial JSON documents deserialize.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GridError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatSettings {
    /// Active UI language (e.g. "de", "en").
    pub language: String,
    pub decimal_separator: String,
    pub group_separator: String,
    /// chrono strftime pattern for date-only columns.
    pub date_format: String,
    /// Pattern for `DateTimeNumeric` columns.
    pub date_time_format: String,
    /// Pattern for `DateTimeSecondString` columns.
    pub date_time_second_format: String,
    /// Offset applied to epoch-millisecond timestamps before formatting.
    pub utc_offset_minutes: i32,
    /// Language codes that may appear as `_xx` or `Xx` suffixes on field names.
    pub supported_languages: Vec<String>,
    /// Prefixes removed from a field before deriving an automatic header key.
    pub header_strip_prefixes: Vec<String>,
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            language: "en".to_string(),
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            date_time_format: "%Y-%m-%d %H:%M".to_string(),
            date_time_second_format: "%Y-%m-%d %H:%M:%S".to_string(),
            utc_offset_minutes: 0,
            supported_languages: vec!["de".to_string(), "en".to_string()],
            header_strip_prefixes: Vec::new(),
        }
    }
}

impl FormatSettings {
    /// Builds settings for a locale tag such as "de-CH" or "en-US".
    /// Unknown tags fall back to the defaults with the language taken from the tag.
    pub fn for_locale(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        let language = tag.split(['-', '_']).next().unwrap_or("en").to_string();

        let (decimal, group, date) = match tag.as_str() {
            "de-ch" => (".", "'", "%d.%m.%Y"),
            "de" | "de-de" | "de-at" => (",", ".", "%d.%m.%Y"),
            "fr" | "fr-fr" | "fr-ch" => (",", " ", "%d/%m/%Y"),
            "it" | "it-it" | "it-ch" => (",", ".", "%d/%m/%Y"),
            "en-us" => (".", ",", "%m/%d/%Y"),
            _ => (".", ",", "%Y-%m-%d"),
        };

        FormatSettings {
            language,
            decimal_separator: decimal.to_string(),
            group_separator: group.to_string(),
            date_format: date.to_string(),
            date_time_format: format!("{} %H:%M", date),
            date_time_second_format: format!("{} %H:%M:%S", date),
            ..FormatSettings::default()
        }
    }

    /// Parses a JSON settings document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The fixed offset used to interpret timestamps.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}
