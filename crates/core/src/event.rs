//! Git lifecycle events hookstack dispatches
//!
//! The set is closed: only these events get a forwarding stub and only these
//! names are accepted by `hookstack run`.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A git hook event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookEvent {
    /// `applypatch-msg`
    ApplypatchMsg,
    /// `pre-applypatch`
    PreApplypatch,
    /// `post-applypatch`
    PostApplypatch,
    /// `pre-commit`
    PreCommit,
    /// `pre-merge-commit`
    PreMergeCommit,
    /// `prepare-commit-msg`
    PrepareCommitMsg,
    /// `commit-msg`
    CommitMsg,
    /// `post-commit`
    PostCommit,
    /// `pre-rebase`
    PreRebase,
    /// `post-checkout`
    PostCheckout,
    /// `post-merge`
    PostMerge,
    /// `pre-push`
    PrePush,
    /// `pre-receive`
    PreReceive,
    /// `update`
    Update,
    /// `post-receive`
    PostReceive,
    /// `post-update`
    PostUpdate,
    /// `pre-auto-gc`
    PreAutoGc,
    /// `post-rewrite`
    PostRewrite,
    /// `sendemail-validate`
    SendemailValidate,
}

impl HookEvent {
    /// Every event, in canonical declaration order
    pub const ALL: [HookEvent; 19] = [
        Self::ApplypatchMsg,
        Self::PreApplypatch,
        Self::PostApplypatch,
        Self::PreCommit,
        Self::PreMergeCommit,
        Self::PrepareCommitMsg,
        Self::CommitMsg,
        Self::PostCommit,
        Self::PreRebase,
        Self::PostCheckout,
        Self::PostMerge,
        Self::PrePush,
        Self::PreReceive,
        Self::Update,
        Self::PostReceive,
        Self::PostUpdate,
        Self::PreAutoGc,
        Self::PostRewrite,
        Self::SendemailValidate,
    ];

    /// The hook name git uses for this event
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ApplypatchMsg => "applypatch-msg",
            Self::PreApplypatch => "pre-applypatch",
            Self::PostApplypatch => "post-applypatch",
            Self::PreCommit => "pre-commit",
            Self::PreMergeCommit => "pre-merge-commit",
            Self::PrepareCommitMsg => "prepare-commit-msg",
            Self::CommitMsg => "commit-msg",
            Self::PostCommit => "post-commit",
            Self::PreRebase => "pre-rebase",
            Self::PostCheckout => "post-checkout",
            Self::PostMerge => "post-merge",
            Self::PrePush => "pre-push",
            Self::PreReceive => "pre-receive",
            Self::Update => "update",
            Self::PostReceive => "post-receive",
            Self::PostUpdate => "post-update",
            Self::PreAutoGc => "pre-auto-gc",
            Self::PostRewrite => "post-rewrite",
            Self::SendemailValidate => "sendemail-validate",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HookEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| Error::UnknownEvent(s.to_string()))
    }
}
