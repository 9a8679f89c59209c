//! Core types for hookstack
//!
//! This is the foundation crate (Layer 0) that all other hookstack crates depend on.
//! It provides:
//! - The closed set of git lifecycle events (`HookEvent`)
//! - The three hook sources and their precedence (`HookSource`)
//! - Base error types and their exit-code classification
//! - Naming conventions shared by the installer and the enumerator
//!
//! This crate has no dependencies on other hookstack crates.

pub mod error;
pub mod event;
pub mod source;

pub use error::{Error, Result};
pub use event::HookEvent;
pub use source::HookSource;

/// Directory (relative to the repository root) that holds hookstack state
pub const CONFIG_DIR: &str = ".hookstack";

/// Filename suffix that excludes an otherwise executable hook
pub const DISABLED_SUFFIX: &str = ".disabled";

/// Filename suffix given to native hooks migrated into the project tree
pub const ORIGINAL_SUFFIX: &str = ".original";

/// Marker line written into every forwarding stub
pub const STUB_MARKER: &str = "# hookstack forwarding stub";
