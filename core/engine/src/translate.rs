//! FILENAME: core/engine/src/translate.rs
//! Translated-Value Cache - precomputed display text for enum-code columns.
//!
//! Translation lookups are supplied by the caller as a one-shot dictionary
//! (the provider may be asynchronous; the engine only ever sees the finished
//! map). `build_translated_cache` then records, per translated column, the
//! text for every raw code present in the rows, so the synchronous sort and
//! filter paths never need the provider.
//!
//! The cache is a side-table keyed by the column's `field$` name and the raw
//! code. Rows themselves are never written to.

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;

use crate::column::TranslateValue;
use crate::path::resolve_cell;
use crate::table::TableConfig;

// ============================================================================
// DICTIONARY
// ============================================================================

/// Key-to-text dictionary for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translations {
    language: String,
    entries: FxHashMap<String, String>,
}

impl Translations {
    pub fn new(language: impl Into<String>) -> Self {
        Translations {
            language: language.into(),
            entries: FxHashMap::default(),
        }
    }

    pub fn with_entries<I, K, V>(language: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut translations = Self::new(language);
        translations.extend(entries);
        translations
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn extend<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// CACHE
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatedValueCache {
    fields: FxHashMap<String, FxHashMap<String, String>>,
}

impl TranslatedValueCache {
    /// Cached text for `code` under the translated field name (`field$`).
    pub fn get(&self, translated_field: &str, code: &str) -> Option<&str> {
        self.fields
            .get(translated_field)
            .and_then(|codes| codes.get(code))
            .map(String::as_str)
    }

    pub fn contains_field(&self, translated_field: &str) -> bool {
        self.fields.contains_key(translated_field)
    }

    /// Number of cached codes for a translated field.
    pub fn code_count(&self, translated_field: &str) -> usize {
        self.fields.get(translated_field).map_or(0, FxHashMap::len)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    fn replace_field(&mut self, translated_field: String, codes: FxHashMap<String, String>) {
        self.fields.insert(translated_field, codes);
    }
}

// ============================================================================
// TABLE OPERATIONS
// ============================================================================

impl TableConfig {
    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Replaces the active dictionary, e.g. after a language change. Callers
    /// re-run `build_translated_cache` and `translate_headers` afterwards.
    pub fn set_translations(&mut self, translations: Translations) {
        self.translations = translations;
    }

    pub fn value_cache(&self) -> &TranslatedValueCache {
        &self.value_cache
    }

    /// All dictionary keys the table needs for `rows`: header keys, group
    /// label keys and the (normalized) codes of translated columns. Sorted and
    /// de-duplicated, ready to hand to a translation provider.
    pub fn translation_keys<'a, I>(&self, rows: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut keys: FxHashSet<String> = FxHashSet::default();
        for column in &self.columns {
            keys.insert(column.header_key.clone());
            keys.extend(
                column
                    .column_group_configs
                    .iter()
                    .filter_map(|g| g.text_value_key.clone()),
            );
        }

        let translated: Vec<_> = self
            .columns
            .iter()
            .filter(|c| c.translate_values.is_enabled())
            .collect();
        if !translated.is_empty() {
            for row in rows {
                for column in &translated {
                    let raw = resolve_cell(row, &column.field);
                    if raw.is_null() {
                        continue;
                    }
                    if let Some(key) = column.translate_values.key_for(&raw.display()) {
                        keys.insert(key);
                    }
                }
            }
        }

        let mut keys: Vec<String> = keys.into_iter().collect();
        keys.sort();
        keys
    }

    /// Precomputes translated text for every translated column and points the
    /// column's `field_translated` at the cache entry. Re-running replaces
    /// previous entries, so it is safe after a language change.
    pub fn build_translated_cache<'a, I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut pending: Vec<(usize, FxHashMap<String, String>)> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.translate_values.is_enabled())
            .map(|(i, _)| (i, FxHashMap::default()))
            .collect();
        if pending.is_empty() {
            return;
        }

        let mut row_count = 0usize;
        for row in rows {
            row_count += 1;
            for (index, codes) in pending.iter_mut() {
                let column = &self.columns[*index];
                let raw = resolve_cell(row, &column.field);
                if raw.is_null() {
                    continue;
                }
                let code = raw.display();
                if codes.contains_key(&code) {
                    continue;
                }
                let text = self.lookup_translation(column.translate_values, &code);
                codes.insert(code, text);
            }
        }

        for (index, codes) in pending {
            let column = &mut self.columns[index];
            let translated_field = column.translated_field_name();
            debug!(
                "translated cache: field={} codes={} rows={} language={}",
                translated_field,
                codes.len(),
                row_count,
                self.translations.language()
            );
            self.value_cache.replace_field(translated_field.clone(), codes);
            column.field_translated = Some(translated_field);
        }
    }

    /// Fills `header_translated` for every column, falling back to the key.
    pub fn translate_headers(&mut self) {
        for column in &mut self.columns {
            let label = self
                .translations
                .get(&column.header_key)
                .unwrap_or(column.header_key.as_str())
                .to_string();
            column.header_translated = Some(label);
        }
    }

    /// Dictionary text for a raw code; unregistered keys yield the code itself.
    pub(crate) fn lookup_translation(&self, mode: TranslateValue, code: &str) -> String {
        mode.key_for(code)
            .and_then(|key| self.translations.get(&key))
            .unwrap_or(code)
            .to_string()
    }
}
