//! Error types for DFC-Table
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the crate
#[derive(Debug, Snafu)]
pub enum Error {
    /// Page size must be a positive integer
    #[snafu(display("Invalid page size: {size} (must be greater than zero)"))]
    InvalidPageSize { size: usize },

    /// At least one page size option is required
    #[snafu(display("Page size options must not be empty"))]
    EmptyPageSizeOptions,

    /// Column identifiers must be unique within one table
    #[snafu(display("Duplicate column identifier: {id}"))]
    DuplicateColumn { id: String },

    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (settings file, record files)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
