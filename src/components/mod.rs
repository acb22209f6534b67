//! Components
//!
//! Table components that don't do I/O.

pub mod composite;
