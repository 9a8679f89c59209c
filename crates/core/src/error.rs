//! Base error types for hookstack
//!
//! Every failure that can stop an invocation is represented here, and each
//! variant maps to the process exit code the front end reports.

use crate::source::HookSource;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for user and environment errors
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a broken installation (unknown event, missing hook directory)
pub const EXIT_INTERNAL: i32 = 70;

/// Exit code when a hook could not be started
pub const EXIT_LAUNCH: i32 = 126;

/// Exit code when a hook was killed after exceeding its timeout
pub const EXIT_TIMEOUT: i32 = 124;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// Command requires a git repository
    #[error("Not inside a git repository: hookstack must be run inside a repository")]
    NotInRepository,

    /// No usable `user.name` is configured
    #[error(
        "No usable git identity: set user.name (e.g. `git config user.name \"Jane Doe\"`) \
         to a value containing at least one letter or digit"
    )]
    MissingIdentity,

    /// Event name is not one of the known git hooks
    #[error("Unknown hook event '{0}' (the forwarding stub may be corrupted)")]
    UnknownEvent(String),

    /// A hook directory that install should have created is gone
    #[error("Missing {hook_source} hook directory{}: run `hookstack install` again", location(.path.as_ref()))]
    MissingHookDirectory {
        /// Which source the directory belongs to
        hook_source: HookSource,
        /// Expected location, absent when it cannot be computed
        path: Option<PathBuf>,
    },

    /// The OS refused to start a hook
    #[error("Failed to launch hook {} (os error {}): {source}", .hook.display(), .source.raw_os_error().unwrap_or(0))]
    HookLaunch {
        /// Hook that could not be started
        hook: PathBuf,
        /// Underlying launch error
        #[source]
        source: std::io::Error,
    },

    /// A hook ran longer than the configured timeout
    #[error("Hook {} timed out after {seconds} seconds", .hook.display())]
    HookTimeout {
        /// Hook that was killed
        hook: PathBuf,
        /// Configured limit
        seconds: u64,
    },

    /// Executable path cannot be written into a forwarding stub
    #[error("Executable path {} is not valid UTF-8", .0.display())]
    NonUtf8Executable(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn location(path: Option<&PathBuf>) -> String {
    path.map(|p| format!(" {}", p.display())).unwrap_or_default()
}

impl Error {
    /// Process exit code the front end should report for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownEvent(_) | Self::MissingHookDirectory { .. } => EXIT_INTERNAL,
            Self::HookLaunch { .. } => EXIT_LAUNCH,
            Self::HookTimeout { .. } => EXIT_TIMEOUT,
            Self::NotInRepository
            | Self::MissingIdentity
            | Self::NonUtf8Executable(_)
            | Self::Io(_)
            | Self::Config(_) => EXIT_FAILURE,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
