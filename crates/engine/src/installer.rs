//! Repository installation
//!
//! Makes hookstack the only thing git runs for every event:
//!
//! 1. Creates the user and project hook trees, one folder per event
//! 2. Moves any native hook that is not ours into the project tree as
//!    `<event>.original`, so it keeps running through dispatch
//! 3. Writes a forwarding stub into every native hook slot
//!
//! Running it again recreates missing folders and rewrites the stubs. Hooks
//! migrated earlier stay where they are.

use crate::identity::Identity;
use crate::layout::HookDirectories;
use hookstack_core::{Error, HookEvent, HookSource, ORIGINAL_SUFFIX, Result, STUB_MARKER};
use std::fs;
use std::path::{Path, PathBuf};

/// A native hook moved into the project tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Event the hook was installed for
    pub event: HookEvent,
    /// Where git had it
    pub from: PathBuf,
    /// Where it lives now
    pub to: PathBuf,
}

/// What an install run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// The project tree did not exist before this run
    pub fresh: bool,
    /// Native hooks moved into the project tree
    pub migrated: Vec<Migration>,
    /// Forwarding stubs written
    pub stubs: Vec<PathBuf>,
}

/// Installs hookstack into the current repository
pub struct Installer<'a> {
    identity: &'a Identity,
    directories: &'a HookDirectories,
    executable: PathBuf,
}

impl<'a> Installer<'a> {
    /// Create an installer whose stubs forward to `executable`
    pub fn new(identity: &'a Identity, directories: &'a HookDirectories, executable: &Path) -> Self {
        Self {
            identity,
            directories,
            executable: executable.to_path_buf(),
        }
    }

    /// Provision the repository
    ///
    /// # Errors
    ///
    /// - [`Error::NotInRepository`] / [`Error::MissingIdentity`] / [`Error::NonUtf8Executable`]
    ///   before anything is touched
    /// - [`Error::Io`] if any filesystem step fails (earlier steps are kept)
    #[tracing::instrument(skip(self), fields(executable = %self.executable.display()))]
    pub fn install(&self) -> Result<InstallReport> {
        let repo = self.identity.repo.as_ref().ok_or(Error::NotInRepository)?;
        let user_root = self
            .directories
            .root(HookSource::User)
            .path()
            .ok_or(Error::MissingIdentity)?;
        let project_root = self
            .directories
            .root(HookSource::Project)
            .path()
            .ok_or(Error::NotInRepository)?;

        let stubs_by_event = HookEvent::ALL
            .into_iter()
            .map(|event| stub_content(&self.executable, event).map(|content| (event, content)))
            .collect::<Result<Vec<_>>>()?;

        let fresh = !project_root.exists();
        if fresh {
            tracing::info!("Fresh install into {}", repo.root.display());
        }

        for root in [user_root, project_root] {
            for event in HookEvent::ALL {
                fs::create_dir_all(root.join(event.name()))?;
            }
        }

        fs::create_dir_all(&repo.hooks_dir)?;

        let mut migrated = Vec::new();
        for event in HookEvent::ALL {
            let native = repo.hooks_dir.join(event.name());
            if is_foreign_hook(&native) {
                let to = original_destination(&project_root.join(event.name()), event);
                move_file(&native, &to)?;
                tracing::info!("Migrated {} to {}", native.display(), to.display());
                migrated.push(Migration {
                    event,
                    from: native,
                    to,
                });
            }
        }

        let mut stubs = Vec::with_capacity(HookEvent::ALL.len());
        for (event, content) in &stubs_by_event {
            let path = repo.hooks_dir.join(event.name());
            write_stub(&path, content)?;
            stubs.push(path);
        }
        tracing::info!(
            "Wrote {} forwarding stubs into {}",
            stubs.len(),
            repo.hooks_dir.display()
        );

        Ok(InstallReport {
            fresh,
            migrated,
            stubs,
        })
    }
}

/// Forwarding stub git runs for `event`
///
/// # Errors
///
/// Returns [`Error::NonUtf8Executable`] if `executable` is not valid UTF-8
pub fn stub_content(executable: &Path, event: HookEvent) -> Result<String> {
    let exe = executable
        .to_str()
        .ok_or_else(|| Error::NonUtf8Executable(executable.to_path_buf()))?;
    Ok(format!(
        "#!/bin/sh\n{STUB_MARKER}\nexec {} run {} \"$@\"\n",
        shell_words::quote(exe),
        event.name()
    ))
}

/// Whether `path` holds something we wrote
pub fn is_stub(path: &Path) -> bool {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).contains(STUB_MARKER))
        .unwrap_or(false)
}

/// A native hook slot occupied by a file (or symlink) that is not a stub
fn is_foreign_hook(path: &Path) -> bool {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            tracing::warn!("Leaving directory {} in native hook slot", path.display());
            false
        }
        Ok(_) => !is_stub(path),
        Err(_) => false,
    }
}

/// `<dir>/<event>.original`, or the first free `<event>-N.original`
fn original_destination(dir: &Path, event: HookEvent) -> PathBuf {
    let first = dir.join(format!("{}{ORIGINAL_SUFFIX}", event.name()));
    if fs::symlink_metadata(&first).is_err() {
        return first;
    }
    (2..)
        .map(|n| dir.join(format!("{}-{n}{ORIGINAL_SUFFIX}", event.name())))
        .find(|candidate| fs::symlink_metadata(candidate).is_err())
        .unwrap_or(first)
}

/// Move a file, falling back to copy + remove across filesystems
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Err(e) = fs::rename(from, to) {
        tracing::debug!("Rename {} failed ({e}), copying instead", from.display());
        // fs::copy keeps the permission bits
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

fn write_stub(path: &Path, content: &str) -> Result<()> {
    // Replace symlinks instead of writing through them
    if fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink()) {
        fs::remove_file(path)?;
    }
    fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::identity::RepoPaths;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    struct Setup {
        temp: TempDir,
        identity: Identity,
        directories: HookDirectories,
    }

    impl Setup {
        fn new(user: Option<&str>) -> Self {
            let temp = TempDir::new().unwrap();
            let root = temp.path().join("repo");
            let hooks_dir = root.join(".git/hooks");
            fs::create_dir_all(&hooks_dir).unwrap();
            let identity = Identity::new(
                Some(RepoPaths {
                    root: root.clone(),
                    hooks_dir,
                }),
                user,
            );
            let directories = HookDirectories::compute(
                Some(&root),
                identity.user.as_deref(),
                &temp.path().join("global"),
            );
            Self {
                temp,
                identity,
                directories,
            }
        }

        fn install(&self) -> Result<InstallReport> {
            Installer::new(&self.identity, &self.directories, Path::new("/usr/bin/hookstack"))
                .install()
        }

        fn root(&self) -> PathBuf {
            self.temp.path().join("repo")
        }

        fn native(&self, event: &str) -> PathBuf {
            self.root().join(".git/hooks").join(event)
        }

        fn project(&self, rel: &str) -> PathBuf {
            self.root().join(".hookstack/hooks/project").join(rel)
        }
    }

    #[test]
    fn test_stub_content() {
        let stub =
            stub_content(Path::new("/usr/local/bin/hookstack"), HookEvent::PreCommit).unwrap();
        assert_eq!(
            stub,
            "#!/bin/sh\n# hookstack forwarding stub\nexec /usr/local/bin/hookstack run pre-commit \"$@\"\n"
        );
    }

    #[test]
    fn test_stub_content_quotes_paths_with_spaces() {
        let stub = stub_content(Path::new("/opt/my tools/hookstack"), HookEvent::PrePush).unwrap();
        assert!(stub.contains("exec '/opt/my tools/hookstack' run pre-push \"$@\""));
    }

    #[test]
    fn test_non_utf8_executable_is_rejected_before_any_change() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let setup = Setup::new(Some("jane"));
        fs::write(setup.native("pre-commit"), "#!/bin/sh\necho legacy\n").unwrap();
        let executable = Path::new(OsStr::from_bytes(b"/opt/hook\xffstack"));

        let err = Installer::new(&setup.identity, &setup.directories, executable)
            .install()
            .unwrap_err();

        assert!(matches!(err, Error::NonUtf8Executable(ref p) if p == executable));
        assert!(matches!(
            stub_content(executable, HookEvent::PreCommit),
            Err(Error::NonUtf8Executable(_))
        ));
        assert!(!setup.root().join(".hookstack").exists());
        assert_eq!(
            fs::read_to_string(setup.native("pre-commit")).unwrap(),
            "#!/bin/sh\necho legacy\n"
        );
    }

    #[test]
    fn test_fresh_install_creates_skeleton_and_stubs() {
        let setup = Setup::new(Some("Jane Doe"));
        let report = setup.install().unwrap();

        assert!(report.fresh);
        assert!(report.migrated.is_empty());
        assert_eq!(report.stubs.len(), HookEvent::ALL.len());

        for event in HookEvent::ALL {
            assert!(setup.project(event.name()).is_dir());
            assert!(
                setup
                    .root()
                    .join(".hookstack/hooks/user/Jane-Doe")
                    .join(event.name())
                    .is_dir()
            );

            let stub = setup.native(event.name());
            assert!(is_stub(&stub));
            let mode = fs::metadata(&stub).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_install_is_idempotent() {
        let setup = Setup::new(Some("jane"));
        setup.install().unwrap();
        let before = fs::read_to_string(setup.native("pre-commit")).unwrap();

        let report = setup.install().unwrap();
        let after = fs::read_to_string(setup.native("pre-commit")).unwrap();

        assert!(!report.fresh);
        assert!(report.migrated.is_empty());
        assert_eq!(before, after);
        let entries = fs::read_dir(setup.project("pre-commit")).unwrap().count();
        assert_eq!(entries, 0);
    }

    #[test]
    fn test_migrates_native_hook_preserving_content_and_mode() {
        let setup = Setup::new(Some("jane"));
        let native = setup.native("pre-commit");
        fs::write(&native, "#!/bin/sh\necho legacy\n").unwrap();
        fs::set_permissions(&native, fs::Permissions::from_mode(0o751)).unwrap();

        let report = setup.install().unwrap();

        let original = setup.project("pre-commit/pre-commit.original");
        assert_eq!(
            report.migrated,
            vec![Migration {
                event: HookEvent::PreCommit,
                from: native.clone(),
                to: original.clone(),
            }]
        );
        assert_eq!(
            fs::read_to_string(&original).unwrap(),
            "#!/bin/sh\necho legacy\n"
        );
        assert_eq!(
            fs::metadata(&original).unwrap().permissions().mode() & 0o777,
            0o751
        );
        assert!(is_stub(&native));
    }

    #[test]
    fn test_migrated_hook_is_not_moved_again() {
        let setup = Setup::new(Some("jane"));
        fs::write(setup.native("pre-commit"), "#!/bin/sh\necho legacy\n").unwrap();

        let first = setup.install().unwrap();
        let second = setup.install().unwrap();

        assert_eq!(first.migrated.len(), 1);
        assert!(second.migrated.is_empty());
        assert!(is_stub(&setup.native("pre-commit")));

        let entries: Vec<String> = fs::read_dir(setup.project("pre-commit"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["pre-commit.original"]);
        assert_eq!(
            fs::read_to_string(setup.project("pre-commit/pre-commit.original")).unwrap(),
            "#!/bin/sh\necho legacy\n"
        );
    }

    #[test]
    fn test_sample_hooks_are_left_alone() {
        let setup = Setup::new(Some("jane"));
        let sample = setup.native("pre-commit.sample");
        fs::write(&sample, "#!/bin/sh\n").unwrap();

        let report = setup.install().unwrap();

        assert!(report.migrated.is_empty());
        assert!(sample.exists());
    }

    #[test]
    fn test_hook_added_after_install_is_migrated_without_overwrite() {
        let setup = Setup::new(Some("jane"));
        fs::write(setup.native("pre-push"), "first").unwrap();
        setup.install().unwrap();

        // Another tool replaced our stub
        fs::write(setup.native("pre-push"), "second").unwrap();
        let report = setup.install().unwrap();

        assert!(!report.fresh);
        assert_eq!(report.migrated.len(), 1);
        assert_eq!(
            fs::read_to_string(setup.project("pre-push/pre-push.original")).unwrap(),
            "first"
        );
        assert_eq!(
            fs::read_to_string(setup.project("pre-push/pre-push-2.original")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_second_user_gets_own_tree() {
        let setup = Setup::new(Some("alice"));
        setup.install().unwrap();

        let bob = Identity::new(setup.identity.repo.clone(), Some("bob"));
        let directories =
            HookDirectories::compute(bob.repo_root(), bob.user.as_deref(), Path::new("/g"));
        let report = Installer::new(&bob, &directories, Path::new("/usr/bin/hookstack"))
            .install()
            .unwrap();

        assert!(!report.fresh);
        assert!(setup.root().join(".hookstack/hooks/user/alice/pre-commit").is_dir());
        assert!(setup.root().join(".hookstack/hooks/user/bob/pre-commit").is_dir());
    }

    #[test]
    fn test_missing_identity_touches_nothing() {
        let setup = Setup::new(Some("!!!"));
        let err = setup.install().unwrap_err();

        assert!(matches!(err, Error::MissingIdentity));
        assert!(!setup.root().join(".hookstack").exists());
        assert!(!setup.native("pre-commit").exists());
    }

    #[test]
    fn test_outside_repository_fails() {
        let identity = Identity::new(None, Some("jane"));
        let directories = HookDirectories::compute(None, Some("jane"), Path::new("/g"));
        let err = Installer::new(&identity, &directories, Path::new("/bin/hookstack"))
            .install()
            .unwrap_err();
        assert!(matches!(err, Error::NotInRepository));
    }

    #[test]
    fn test_creates_missing_native_hooks_dir() {
        let setup = Setup::new(Some("jane"));
        fs::remove_dir_all(setup.root().join(".git/hooks")).unwrap();

        setup.install().unwrap();
        assert!(is_stub(&setup.native("post-merge")));
    }
}
