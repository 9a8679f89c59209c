//! Shared helpers for binary-level tests
//!
//! Each test gets a scratch directory holding a fake home, a config home and
//! a git repository created with libgit2. The binary runs with its
//! environment pinned to those directories.

#![allow(dead_code, clippy::unwrap_used, clippy::panic)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Variables that would leak the developer's environment into a test run
const SCRUBBED: [&str; 10] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
    "RUST_LOG",
    "HOOKSTACK_CONFIG",
    "HOOKSTACK_GLOBAL_DIR",
    "HOOKSTACK_LOG_FILE",
    "HOOKSTACK_TIMEOUT",
    "XDG_CONFIG_DIRS",
];

pub struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("home")).unwrap();
        fs::create_dir_all(temp.path().join("xdg")).unwrap();
        fs::create_dir_all(temp.path().join("outside")).unwrap();
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn home(&self) -> PathBuf {
        self.path().join("home")
    }

    pub fn repo(&self) -> PathBuf {
        self.path().join("repo")
    }

    /// A directory that is not inside any repository
    pub fn outside(&self) -> PathBuf {
        self.path().join("outside")
    }

    pub fn global_root(&self) -> PathBuf {
        self.home().join(".hookstack/hooks/global")
    }

    pub fn project_root(&self) -> PathBuf {
        self.repo().join(".hookstack/hooks/project")
    }

    pub fn user_root(&self, sanitized: &str) -> PathBuf {
        self.repo().join(".hookstack/hooks/user").join(sanitized)
    }

    pub fn native_hook(&self, event: &str) -> PathBuf {
        self.repo().join(".git/hooks").join(event)
    }

    /// Initialize the repository, optionally with a `user.name`
    pub fn init_repo(&self, user_name: Option<&str>) {
        let repo = git2::Repository::init(self.repo()).unwrap();
        if let Some(name) = user_name {
            repo.config().unwrap().set_str("user.name", name).unwrap();
        }
    }

    /// Initialize the repository and run `hookstack install` in it
    pub fn installed(user_name: &str) -> Self {
        let sandbox = Self::new();
        sandbox.init_repo(Some(user_name));
        let output = sandbox.run_in(&sandbox.repo(), &["install"]);
        assert_success(&output);
        sandbox
    }

    /// Run the binary from the repository root
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_in(&self.repo(), args)
    }

    /// Run the binary from `dir`
    pub fn run_in(&self, dir: &Path, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_hookstack"));
        command.args(args);
        self.pin_environment(&mut command, dir);
        command.output().unwrap()
    }

    /// Run an executable (a forwarding stub) the way git would
    pub fn run_program(&self, program: &Path, args: &[&str]) -> Output {
        let mut command = Command::new(program);
        command.args(args);
        self.pin_environment(&mut command, &self.repo());
        command.output().unwrap()
    }

    fn pin_environment(&self, command: &mut Command, dir: &Path) {
        for key in SCRUBBED {
            command.env_remove(key);
        }
        command
            .current_dir(dir)
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("GIT_CEILING_DIRECTORIES", self.path())
            .env("GIT_CONFIG_NOSYSTEM", "1");
    }

    /// Path of a file the hooks in this sandbox append to
    pub fn log(&self) -> PathBuf {
        self.path().join("calls.log")
    }

    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Write a hook that records `name` and exits with `code`
    pub fn recording_hook(&self, dir: &Path, name: &str, code: i32) -> PathBuf {
        let path = dir.join(name);
        write_script(
            &path,
            &format!("echo {name} >> '{}'\nexit {code}\n", self.log().display()),
        );
        path
    }
}

/// Write an executable shell script
pub fn write_script(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "exit {:?}\nstdout:\n{}\nstderr:\n{}",
        output.status.code(),
        stdout(output),
        stderr(output)
    );
}
