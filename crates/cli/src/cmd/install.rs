//! Install command implementation

use anyhow::Context;
use clap::Args;
use hookstack_engine::Installer;
use owo_colors::OwoColorize;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Install command arguments
#[derive(Debug, Args)]
pub struct InstallCommand {}

impl Command for InstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let executable =
            std::env::current_exe().context("Cannot determine the hookstack executable path")?;

        let report = Installer::new(&context.identity, &context.directories, &executable)
            .install()?;

        for migration in &report.migrated {
            println!(
                "{} {} {} {}",
                "Moved".yellow(),
                migration.from.display(),
                "->".dimmed(),
                migration.to.display()
            );
        }

        let verb = if report.fresh { "Installed" } else { "Updated" };
        println!(
            "{} hookstack ({} hooks forwarded to {})",
            verb.green().bold(),
            report.stubs.len(),
            executable.display().cyan()
        );

        Ok(())
    }
}
