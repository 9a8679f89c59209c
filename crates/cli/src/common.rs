//! Common types shared across CLI commands

use hookstack_engine::{HookDirectories, Identity};
use std::path::Path;
use std::time::Duration;

/// Runtime context for CLI commands
///
/// Built once at startup from git and the configuration, then passed by
/// reference to whichever command runs. Nothing in it changes afterwards.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    /// Repository and user the invocation belongs to
    pub identity: Identity,
    /// Hook roots for every source
    pub directories: HookDirectories,
    /// Per-hook time limit
    pub timeout: Option<Duration>,
}

impl RuntimeContext {
    /// Compute the hook directories for `identity` and bundle them
    #[must_use]
    pub fn new(identity: Identity, global_root: &Path, timeout: Option<Duration>) -> Self {
        let directories =
            HookDirectories::compute(identity.repo_root(), identity.user.as_deref(), global_root);
        Self {
            identity,
            directories,
            timeout,
        }
    }
}
