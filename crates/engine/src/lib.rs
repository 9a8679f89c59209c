//! # hookstack engine
//!
//! Resolution and execution of layered git hooks.
//!
//! - **Identity**: repository location and sanitized user name, read from git
//! - **Layout**: the user, project and global hook roots for an invocation
//! - **Hooks**: enumeration of eligible scripts and sequential dispatch
//! - **Installer**: directory skeleton, native hook migration and forwarding stubs

pub mod hooks;
pub mod identity;
pub mod installer;
pub mod layout;

// Re-export error types from core
pub use hookstack_core::{Error, Result};

pub use hooks::{DispatchOutcome, Dispatcher, DispatcherBuilder, HookLoader, HookScript};
pub use identity::{Identity, RepoPaths, sanitize};
pub use installer::{InstallReport, Installer, Migration};
pub use layout::{HookDirectories, SourceRoot};
