//! FILENAME: core/persistence/src/checksum.rs
//! PURPOSE: Structural fingerprint over a set of column field names.
//! CONTEXT: Not a hash in the cryptographic sense. Two column sets that differ
//! by an added, removed or renamed field produce different strings in
//! practice, which is all the visibility restore needs.

use std::collections::BTreeSet;

const CHECKSUM_NUMERATOR: f64 = 65027.0;
const MAX_CHECKSUM_LEN: usize = 20;

/// Removes a trailing language marker (`name_de`, `nameDe`) so that switching
/// the UI language does not count as a structural change.
pub fn strip_locale_suffix<'a>(field: &'a str, languages: &[String]) -> &'a str {
    for lang in languages {
        if lang.is_empty() {
            continue;
        }

        let snake = format!("_{}", lang);
        if field.len() > snake.len() {
            let cut = field.len() - snake.len();
            if field.is_char_boundary(cut) && field[cut..].eq_ignore_ascii_case(&snake) {
                return &field[..cut];
            }
        }

        let mut chars = lang.chars();
        let camel: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => continue,
        };
        if let Some(base) = field.strip_suffix(camel.as_str()) {
            if base.chars().last().is_some_and(|c| c.is_lowercase()) {
                return base;
            }
        }
    }
    field
}

/// Position-weighted sum of UTF-16 code units.
fn field_score(field: &str) -> u64 {
    field
        .encode_utf16()
        .enumerate()
        .map(|(i, unit)| unit as u64 * (i as u64 + 1))
        .sum()
}

/// Computes the checksum string for a set of field names. Order and
/// duplicates do not matter.
pub fn column_checksum<'a, I>(fields: I, languages: &[String]) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let unique: BTreeSet<&str> = fields
        .into_iter()
        .map(|f| strip_locale_suffix(f, languages))
        .collect();

    let total: f64 = unique
        .into_iter()
        .map(field_score)
        .filter(|&score| score > 0)
        .map(|score| CHECKSUM_NUMERATOR / score as f64)
        .sum();

    let mut text = format!("{:.12}", total);
    text.truncate(MAX_CHECKSUM_LEN);
    text
}
