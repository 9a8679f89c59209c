//! Repository and user identity
//!
//! Everything hookstack needs to know about the invoking context comes from
//! git through libgit2: where the repository lives, where git looks for its
//! native hooks, and who the user is. The result is computed once per
//! invocation and never changes afterwards.

use git2::{Config, Repository};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]+").expect("static regex is valid"));

/// Locations inside a discovered repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    /// Work tree root, or the git directory itself for bare repositories
    pub root: PathBuf,
    /// Directory git runs native hooks from
    pub hooks_dir: PathBuf,
}

/// Resolved identity of an invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Enclosing repository, if any
    pub repo: Option<RepoPaths>,
    /// Sanitized `user.name`, if a usable one is configured
    pub user: Option<String>,
}

impl Identity {
    /// Resolve from the process environment
    ///
    /// Honours `GIT_DIR` and friends (set by git when it runs a hook) and
    /// otherwise discovers the repository upwards from the current directory.
    pub fn resolve() -> Self {
        Self::from_repository(Repository::open_from_env().ok())
    }

    /// Resolve by discovering the repository upwards from `path`
    pub fn discover(path: &Path) -> Self {
        Self::from_repository(Repository::discover(path).ok())
    }

    /// Build an identity from an explicit repository and user name
    #[must_use]
    pub fn new(repo: Option<RepoPaths>, user_name: Option<&str>) -> Self {
        Self {
            repo,
            user: user_name.and_then(normalize_user),
        }
    }

    fn from_repository(repo: Option<Repository>) -> Self {
        let Some(repo) = repo else {
            tracing::debug!("Not inside a git repository");
            let user = Config::open_default().ok().and_then(|c| user_from_config(&c));
            return Self { repo: None, user };
        };

        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        let config = repo.config().ok();
        let hooks_dir = native_hooks_dir(&repo, config.as_ref(), &root);
        let user = config.as_ref().and_then(user_from_config);

        tracing::debug!(
            root = %root.display(),
            hooks_dir = %hooks_dir.display(),
            user = ?user,
            "Resolved repository identity"
        );

        Self {
            repo: Some(RepoPaths {
                root,
                hooks_dir,
            }),
            user,
        }
    }

    /// Repository root, if inside a repository
    #[must_use]
    pub fn repo_root(&self) -> Option<&Path> {
        self.repo.as_ref().map(|r| r.root.as_path())
    }
}

/// Where git looks for native hooks
///
/// `core.hooksPath` wins when set; relative values are relative to the
/// directory hooks run in, which is the work tree root.
fn native_hooks_dir(repo: &Repository, config: Option<&Config>, root: &Path) -> PathBuf {
    if let Some(config) = config
        && let Ok(path) = config.get_path("core.hooksPath")
    {
        return if path.is_absolute() {
            path
        } else {
            root.join(path)
        };
    }
    repo.commondir().join("hooks")
}

/// Read and sanitize `user.name` from a (merged) git configuration
pub fn user_from_config(config: &Config) -> Option<String> {
    config
        .get_string("user.name")
        .ok()
        .and_then(|name| normalize_user(&name))
}

fn normalize_user(name: &str) -> Option<String> {
    let sanitized = sanitize(name);
    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

/// Make a user name safe to use as a directory name
///
/// Every run of characters outside `[A-Za-z0-9]` becomes a single `-`, and
/// leading/trailing separators are trimmed. Distinct names can collide
/// (`"Jane Doe"` and `"jane.doe"` do not, but `"Jane Doe"` and `"Jane_Doe"` do).
#[must_use]
pub fn sanitize(name: &str) -> String {
    NON_ALNUM_RUN
        .replace_all(name, "-")
        .trim_matches('-')
        .to_string()
}
