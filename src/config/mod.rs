//! Configuration module for the contact book
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ContactBookPaths;
pub use settings::Settings;
