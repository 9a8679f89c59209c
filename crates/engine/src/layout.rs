//! Hook directory layout
//!
//! Maps each [`HookSource`] to the directory holding its per-event hook
//! folders:
//!
//! ```text
//! <repo>/.hookstack/hooks/user/<user>/<event>/
//! <repo>/.hookstack/hooks/project/<event>/
//! <global>/<event>/
//! ```

use hookstack_core::{CONFIG_DIR, HookSource};
use std::path::{Path, PathBuf};

/// Location of one hook source for the current invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRoot {
    /// Directory the source lives in
    Resolved(PathBuf),
    /// The source applies but its location cannot be computed (no user identity)
    Unresolved,
    /// The source does not apply (no repository)
    Absent,
}

impl SourceRoot {
    /// Resolved directory, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Resolved(path) => Some(path),
            Self::Unresolved | Self::Absent => None,
        }
    }
}

/// Hook roots for every source, in dispatch order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookDirectories {
    user: SourceRoot,
    project: SourceRoot,
    global: SourceRoot,
}

impl HookDirectories {
    /// Compute the roots for a repository, user and global directory
    ///
    /// Outside a repository only the global root applies. Inside one, a
    /// missing user identity leaves the user slot [`SourceRoot::Unresolved`].
    #[must_use]
    pub fn compute(repo_root: Option<&Path>, user: Option<&str>, global_root: &Path) -> Self {
        let global = SourceRoot::Resolved(global_root.to_path_buf());

        let Some(root) = repo_root else {
            return Self {
                user: SourceRoot::Absent,
                project: SourceRoot::Absent,
                global,
            };
        };

        let hooks = hooks_base(root);
        let user = match user {
            Some(name) => SourceRoot::Resolved(hooks.join("user").join(name)),
            None => SourceRoot::Unresolved,
        };

        Self {
            user,
            project: SourceRoot::Resolved(hooks.join("project")),
            global,
        }
    }

    /// Root for a single source
    #[must_use]
    pub fn root(&self, source: HookSource) -> &SourceRoot {
        match source {
            HookSource::User => &self.user,
            HookSource::Project => &self.project,
            HookSource::Global => &self.global,
        }
    }

    /// All sources paired with their roots, most specific first
    pub fn entries(&self) -> impl Iterator<Item = (HookSource, &SourceRoot)> {
        HookSource::PRECEDENCE
            .into_iter()
            .map(move |source| (source, self.root(source)))
    }
}

/// `<repo>/.hookstack/hooks`
#[must_use]
pub fn hooks_base(repo_root: &Path) -> PathBuf {
    repo_root.join(CONFIG_DIR).join("hooks")
}
