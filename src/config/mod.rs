//! Configuration module for Monthwise
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MonthwisePaths;
pub use settings::Settings;
