//! Configuration management for hookstack
//!
//! This crate handles:
//! - Configuration file loading
//! - XDG and home directory defaults
//! - Logging initialization

pub mod config;
pub mod dirs;
pub mod logging;

// Re-export error types from core
pub use hookstack_core::{Error, Result};

pub use config::Config;
pub use dirs::{config_dir, default_config_file, default_global_hooks_dir};
