//! Configuration module for nextcheck
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::NextCheckPaths;
pub use settings::{DueDayOverflow, Settings};
