//! Display formatting for terminal output
//!
//! Provides utilities for formatting movements, the taxonomy and reports
//! as terminal tables and trees.

pub mod movement;
pub mod report;
pub mod taxonomy;

pub use movement::{format_movement_details, format_movement_register};
pub use taxonomy::format_taxonomy_tree;
