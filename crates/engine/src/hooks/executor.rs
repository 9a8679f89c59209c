//! Hook dispatch
//!
//! Runs every eligible script for an event, one at a time, walking the
//! sources from most to least specific. The first script that exits non-zero
//! stops the dispatch and its exit code becomes the outcome.

use super::loader::{HookLoader, HookScript};
use crate::layout::{HookDirectories, SourceRoot};
use hookstack_core::{Error, HookEvent, HookSource, Result};
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// Environment variable naming the event being dispatched
pub const ENV_EVENT: &str = "HOOKSTACK_EVENT";

/// Environment variable naming the source of the running hook
pub const ENV_SOURCE: &str = "HOOKSTACK_SOURCE";

/// Result of a completed dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every eligible hook exited with status 0
    Success {
        /// Number of hooks that ran
        executed: usize,
    },
    /// A hook exited non-zero; nothing after it ran
    Failed {
        /// The blocking hook
        hook: PathBuf,
        /// Source the hook came from
        source: HookSource,
        /// Exit code (128 + signal for hooks killed by a signal)
        code: i32,
    },
}

impl DispatchOutcome {
    /// Process exit code for this outcome
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success { .. } => 0,
            Self::Failed { code, .. } => *code,
        }
    }
}

/// Sequential hook dispatcher
///
/// # Examples
///
/// ```ignore
/// let dispatcher = Dispatcher::builder(&directories)
///     .timeout(Some(Duration::from_secs(60)))
///     .build();
/// let outcome = dispatcher.run("pre-commit", &args)?;
/// ```
pub struct Dispatcher<'a> {
    directories: &'a HookDirectories,
    timeout: Option<Duration>,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher with default settings (no timeout)
    pub fn new(directories: &'a HookDirectories) -> Self {
        Self::builder(directories).build()
    }

    /// Create a builder for configuring a dispatcher
    pub fn builder(directories: &'a HookDirectories) -> DispatcherBuilder<'a> {
        DispatcherBuilder::new(directories)
    }

    /// Dispatch `event`, forwarding `args` to every hook
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownEvent`] if `event` is not a known git hook
    /// - [`Error::MissingHookDirectory`] if a user or project directory is missing
    /// - [`Error::HookLaunch`] / [`Error::HookTimeout`] if a hook cannot be run to completion
    #[tracing::instrument(skip(self, args), fields(event = %event, args = args.len()))]
    pub fn run(&self, event: &str, args: &[String]) -> Result<DispatchOutcome> {
        let event: HookEvent = event.parse()?;
        let mut executed = 0;

        for (source, root) in self.directories.entries() {
            let Some(scripts) = scripts_for(source, root, event)? else {
                continue;
            };

            for script in &scripts {
                let code = self.execute(script, source, args)?;
                executed += 1;
                if code != 0 {
                    tracing::debug!(
                        "Hook {} exited with {code}, stopping dispatch",
                        script.path.display()
                    );
                    return Ok(DispatchOutcome::Failed {
                        hook: script.path.clone(),
                        source,
                        code,
                    });
                }
            }
        }

        tracing::debug!("All {executed} hook(s) passed");
        Ok(DispatchOutcome::Success { executed })
    }

    /// Run one hook to completion and return its exit code
    fn execute(&self, script: &HookScript, source: HookSource, args: &[String]) -> Result<i32> {
        tracing::debug!("Running {source} hook {}", script.path.display());

        // stdio and working directory are inherited
        let handle = duct::cmd(script.path.as_path(), args)
            .unchecked()
            .env(ENV_EVENT, script.event.name())
            .env(ENV_SOURCE, source.name())
            .start().map_err(|e| Error::HookLaunch {
            hook: script.path.clone(),
            source: e,
        })?;

        let status = match self.timeout {
            Some(limit) => match handle.wait_timeout(limit)? {
                Some(output) => output.status,
                None => {
                    tracing::warn!(
                        "Hook {} exceeded {}s, killing it",
                        script.path.display(),
                        limit.as_secs()
                    );
                    if let Err(e) = handle.kill() {
                        tracing::warn!("Failed to kill {}: {e}", script.path.display());
                    }
                    return Err(Error::HookTimeout {
                        hook: script.path.clone(),
                        seconds: limit.as_secs(),
                    });
                }
            },
            None => handle.wait()?.status,
        };

        Ok(exit_code_of(status))
    }
}

/// Scripts to run for one source, or `None` when the source does not apply
fn scripts_for(
    source: HookSource,
    root: &SourceRoot,
    event: HookEvent,
) -> Result<Option<Vec<HookScript>>> {
    match root {
        SourceRoot::Absent => Ok(None),
        SourceRoot::Unresolved if source.is_required() => Err(Error::MissingHookDirectory {
            hook_source: source,
            path: None,
        }),
        SourceRoot::Unresolved => Ok(None),
        SourceRoot::Resolved(path) => {
            if !path.is_dir() {
                if source.is_required() {
                    return Err(Error::MissingHookDirectory {
                        hook_source: source,
                        path: Some(path.clone()),
                    });
                }
                tracing::debug!("No {source} hooks at {}", path.display());
                return Ok(None);
            }
            HookLoader::new(path).list_for_event(event).map(Some)
        }
    }
}

/// Exit code of a finished process, `128 + signal` when it was killed
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Builder for [`Dispatcher`]
pub struct DispatcherBuilder<'a> {
    directories: &'a HookDirectories,
    timeout: Option<Duration>,
}

impl<'a> DispatcherBuilder<'a> {
    /// Create a builder over the given hook directories
    pub fn new(directories: &'a HookDirectories) -> Self {
        Self {
            directories,
            timeout: None,
        }
    }

    /// Kill any hook that runs longer than `timeout` (`None` waits forever)
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the dispatcher
    pub fn build(self) -> Dispatcher<'a> {
        Dispatcher {
            directories: self.directories,
            timeout: self.timeout,
        }
    }
}
