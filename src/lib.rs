//! DFC Table Library
//!
//! A headless data table with client-side filtering and pagination. Cells,
//! headers and slots are produced by caller renderers into any fragment type;
//! [`render_text`] lays out string tables and the `gpui` feature adds a view.

rust_i18n::i18n!("locales", fallback = "en");

pub mod components;
pub mod constants;
pub mod error;
pub mod helpers;
pub mod states;
#[cfg(feature = "gpui")]
pub mod theme;

pub use components::composite::data_table::*;
pub use error::{Error, Result};
pub use states::TableSettings;
