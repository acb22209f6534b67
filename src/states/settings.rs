//! Table Settings
//!
//! Persisted defaults for tables, stored as TOML in the config directory.

use std::path::{Path, PathBuf};

use locale_config::Locale;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::components::composite::data_table::TableOptions;
use crate::constants::{DEFAULT_LOCALE, DEFAULT_PAGE_SIZE_OPTIONS, SETTINGS_FILE_NAME};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;

fn get_settings_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(SETTINGS_FILE_NAME))
}

/// Persisted table settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    locale: Option<String>,
    page_size_options: Vec<usize>,
    show_pagination: bool,
    empty_state_message: Option<String>,
    auto_reset_page_index: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            locale: None,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            show_pagination: true,
            empty_state_message: None,
            auto_reset_page_index: true,
        }
    }
}

impl TableSettings {
    /// Load settings from the config directory
    pub fn try_load() -> Result<Self> {
        Self::load_from(&get_settings_path()?)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            error!(error = %e, "Failed to load table settings, using defaults");
            Self::default().with_system_locale()
        })
    }

    /// Load settings from `path`; a missing or blank file gives defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        info!(path = ?path, "Loading settings file");
        if !path.exists() {
            return Ok(Self::default().with_system_locale());
        }

        let value = std::fs::read_to_string(path)?;
        if value.trim().is_empty() {
            return Ok(Self::default().with_system_locale());
        }

        let settings: Self = toml::from_str(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse settings file");
            e
        })?;
        settings.validate()?;
        Ok(settings.with_system_locale())
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<PathBuf> {
        let path = get_settings_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let value = toml::to_string(self)?;
        std::fs::write(path, value)?;
        info!(path = ?path, "Settings saved");
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.page_size_options.is_empty() {
            return Err(Error::EmptyPageSizeOptions);
        }
        if self.page_size_options.contains(&0) {
            return Err(Error::InvalidPageSize { size: 0 });
        }
        Ok(())
    }

    /// Fill an unset locale from the system locale
    fn with_system_locale(mut self) -> Self {
        if self.locale.as_ref().is_none_or(|l| l.is_empty()) {
            let current = Locale::current().to_string();
            let lang = current.split_once('-').map_or(current.as_str(), |(lang, _)| lang);
            if lang.is_empty() {
                warn!("System locale unavailable");
            } else {
                self.locale = Some(lang.to_string());
            }
        }
        self
    }

    // ==================== Getters ====================

    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn show_pagination(&self) -> bool {
        self.show_pagination
    }

    pub fn auto_reset_page_index(&self) -> bool {
        self.auto_reset_page_index
    }

    /// Configured message, or the translated default
    pub fn empty_state_message(&self) -> String {
        self.empty_state_message
            .clone()
            .unwrap_or_else(|| super::i18n_table(self.locale(), "no_results"))
    }

    // ==================== Setters ====================

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = Some(locale.into());
    }

    pub fn set_page_size_options(&mut self, options: Vec<usize>) {
        self.page_size_options = options;
    }

    pub fn set_show_pagination(&mut self, show: bool) {
        self.show_pagination = show;
    }

    pub fn set_empty_state_message(&mut self, message: Option<String>) {
        self.empty_state_message = message;
    }

    pub fn set_auto_reset_page_index(&mut self, enabled: bool) {
        self.auto_reset_page_index = enabled;
    }

    /// Table options seeded from these settings
    pub fn into_options(self) -> TableOptions {
        let empty_state_message = self.empty_state_message();
        TableOptions::default()
            .page_size_options(self.page_size_options)
            .show_pagination(self.show_pagination)
            .auto_reset_page_index(self.auto_reset_page_index)
            .empty_state_message(empty_state_message)
    }
}
