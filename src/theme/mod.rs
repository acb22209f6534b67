//! Theme - Table colors for the gpui view

pub mod colors;

pub use colors::TableColors;
