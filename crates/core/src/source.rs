//! Hook sources and their precedence

use serde::Serialize;
use std::fmt;

/// One of the three tiers that supply hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookSource {
    /// Per-user hooks inside the repository
    User,
    /// Hooks shared by everyone working on the repository
    Project,
    /// Hooks installed for every repository of this account
    Global,
}

impl HookSource {
    /// Dispatch order: most specific first, every tier must pass
    pub const PRECEDENCE: [HookSource; 3] = [Self::User, Self::Project, Self::Global];

    /// Lowercase name, also exported to hooks as `HOOKSTACK_SOURCE`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Global => "global",
        }
    }

    /// Whether the directory must exist whenever a repository is present
    ///
    /// Global hooks are optional; user and project trees are created by
    /// `install`, so their absence means the installation drifted.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Global)
    }
}

impl fmt::Display for HookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
