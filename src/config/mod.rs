//! Configuration module for Quincena
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Application preferences

pub mod paths;
pub mod settings;

pub use paths::QuincenaPaths;
pub use settings::Settings;
