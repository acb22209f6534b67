//! Internationalization Helpers
//!
//! Translations for the table's built-in labels.

use rust_i18n::t;

/// Get translated string from "table" namespace
pub fn i18n_table(locale: &str, key: &str) -> String {
    t!(format!("table.{key}"), locale = locale).into_owned()
}

/// Format the pagination summary, e.g. "11-20 of 25"
pub fn i18n_range_summary(locale: &str, range: &str, total: usize) -> String {
    t!("table.range_of", locale = locale, range = range, total = total).into_owned()
}

/// Locales shipped in `locales/`
pub fn available_locales() -> Vec<&'static str> {
    rust_i18n::available_locales!()
}
