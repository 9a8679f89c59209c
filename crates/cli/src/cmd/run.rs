//! Run command implementation
//!
//! Dispatches one event. This is what the forwarding stubs call, so its
//! exit code is what git sees.

use clap::Args;
use hookstack_engine::{DispatchOutcome, Dispatcher};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Run command arguments
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Git hook event (e.g. pre-commit)
    #[arg(value_name = "EVENT")]
    pub event: String,

    /// Arguments passed through to every hook
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Command for RunCommand {
    type Output = i32;

    fn execute(&self, context: &RuntimeContext) -> Result<i32> {
        let outcome = Dispatcher::builder(&context.directories)
            .timeout(context.timeout)
            .build()
            .run(&self.event, &self.args)?;

        if let DispatchOutcome::Failed { hook, source, code } = &outcome {
            tracing::warn!(
                "{} blocked by {source} hook {} (exit {code})",
                self.event,
                hook.display()
            );
        }

        Ok(outcome.exit_code())
    }
}
