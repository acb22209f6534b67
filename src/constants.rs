//! Table Constants
//!
//! Centralized defaults shared by the table, its settings and the demo binary.

/// Page size choices offered by the pagination control
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 50, 100];

/// Locale used when neither settings nor the system provide one
pub const DEFAULT_LOCALE: &str = "en";

/// Action name passed to the create-action slot
pub const CREATE_ACTION: &str = "create";

/// Settings file name inside the config directory
pub const SETTINGS_FILE_NAME: &str = "dfc-table.toml";

/// Log file name prefix inside the data directory
pub const LOG_FILE_PREFIX: &str = "dfc-table.log";

/// Row height of the gpui table body (pixels)
pub const ROW_HEIGHT: f32 = 36.0;

/// Header height of the gpui table (pixels)
pub const HEADER_HEIGHT: f32 = 40.0;
