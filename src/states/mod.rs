//! Shared State
//!
//! Persisted table settings and translation helpers.

mod i18n;
mod settings;

pub use i18n::*;
pub use settings::*;
