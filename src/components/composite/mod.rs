//! Composite Components
//!
//! Components built from several parts.

pub mod data_table;
