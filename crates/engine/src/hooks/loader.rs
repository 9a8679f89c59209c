//! Hook discovery
//!
//! Scans `<root>/<event>/` for scripts that are allowed to run. A script is
//! eligible when it is a regular file (or a symlink to one) with an execute
//! bit set and its name does not end in `.disabled`.

use hookstack_core::{DISABLED_SUFFIX, HookEvent, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An eligible hook script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookScript {
    /// Event the script belongs to
    pub event: HookEvent,
    /// File name inside the event directory
    pub name: String,
    /// Full path used to launch the script
    pub path: PathBuf,
}

impl HookScript {
    /// Path relative to the source root (`<event>/<name>`)
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        Path::new(self.event.name()).join(&self.name)
    }
}

/// Discover hook scripts below a source root
#[derive(Debug, Clone)]
pub struct HookLoader {
    root: PathBuf,
}

impl HookLoader {
    /// Create a loader for the given source root
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Eligible scripts for one event, sorted by file name
    ///
    /// A missing event directory yields no scripts.
    ///
    /// # Errors
    ///
    /// Returns an error if the event directory exists but cannot be read
    pub fn list_for_event(&self, event: HookEvent) -> Result<Vec<HookScript>> {
        let dir = self.root.join(event.name());
        if !dir.is_dir() {
            tracing::debug!("No hook directory at {}", dir.display());
            return Ok(Vec::new());
        }

        let mut scripts = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            if name.ends_with(DISABLED_SUFFIX) {
                tracing::debug!("Skipping disabled hook {}", path.display());
                continue;
            }

            match is_executable_file(&path) {
                Ok(true) => scripts.push(HookScript { event, name, path }),
                Ok(false) => {
                    tracing::debug!("Skipping non-executable entry {}", path.display());
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable hook entry {}: {e}", path.display());
                }
            }
        }

        // Byte-wise name order keeps numeric prefixes (10-lint, 20-test) meaningful
        scripts.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::debug!(
            "Found {} hook(s) for {} in {}",
            scripts.len(),
            event,
            self.root.display()
        );
        Ok(scripts)
    }

    /// Eligible scripts for every event, in event declaration order
    ///
    /// Events without scripts are omitted.
    pub fn list_all(&self) -> Result<Vec<(HookEvent, Vec<HookScript>)>> {
        let mut all = Vec::new();
        for event in HookEvent::ALL {
            let scripts = self.list_for_event(event)?;
            if !scripts.is_empty() {
                all.push((event, scripts));
            }
        }
        Ok(all)
    }
}

/// Regular file (following symlinks) with any execute bit set
fn is_executable_file(path: &Path) -> io::Result<bool> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Ok(false);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Ok(metadata.permissions().mode() & 0o111 != 0)
    }

    #[cfg(not(unix))]
    {
        Ok(true)
    }
}
