//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Storage location resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
