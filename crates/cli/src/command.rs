//! Command trait for the hookstack CLI
//!
//! Every subcommand implements [`Command`] and receives the same
//! [`RuntimeContext`], resolved once before dispatch.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all hookstack commands
///
/// `Output` is whatever the front end needs to finish the process: `run`
/// returns the exit code of the dispatch, the other commands return `()`.
///
/// # Example
///
/// ```rust,ignore
/// use crate::command::Command;
/// use crate::common::RuntimeContext;
/// use crate::error::Result;
/// use clap::Args;
///
/// #[derive(Debug, Args)]
/// pub struct MyCommand {
///     #[arg(long)]
///     pub dry_run: bool,
/// }
///
/// impl Command for MyCommand {
///     type Output = ();
///
///     fn execute(&self, context: &RuntimeContext) -> Result<()> {
///         // context.identity, context.directories, context.timeout
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails. Its exit code decides
    /// the process status.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
