//! List command implementation
//!
//! Shows, per source and in dispatch order, every hook that would run.

use clap::{Args, ValueEnum};
use hookstack_core::HookSource;
use hookstack_engine::{HookLoader, SourceRoot};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Output format for `list`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human readable, grouped by source
    #[default]
    Simple,
    /// Machine readable JSON
    Json,
}

/// List command arguments
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Simple)]
    pub format: ListFormat,
}

#[derive(Debug, Serialize)]
struct Listing {
    sources: Vec<SourceListing>,
}

#[derive(Debug, Serialize)]
struct SourceListing {
    source: HookSource,
    /// `None` when the source does not apply here
    path: Option<PathBuf>,
    /// `<event>/<filename>`, relative to `path`
    hooks: Vec<PathBuf>,
}

impl Command for ListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let listing = collect(context)?;
        match self.format {
            ListFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
            ListFormat::Simple => print_simple(&listing),
        }
        Ok(())
    }
}

fn collect(context: &RuntimeContext) -> Result<Listing> {
    let mut sources = Vec::new();
    for (source, root) in context.directories.entries() {
        let hooks: Vec<PathBuf> = match root {
            SourceRoot::Resolved(path) => HookLoader::new(path)
                .list_all()?
                .into_iter()
                .flat_map(|(_, scripts)| scripts)
                .map(|script| script.relative_path())
                .collect(),
            SourceRoot::Unresolved | SourceRoot::Absent => Vec::new(),
        };
        sources.push(SourceListing {
            source,
            path: root.path().map(PathBuf::from),
            hooks,
        });
    }
    Ok(Listing { sources })
}

fn print_simple(listing: &Listing) {
    for entry in &listing.sources {
        match &entry.path {
            Some(path) => println!("{} {}", entry.source.bold(), path.display().dimmed()),
            None => println!("{} {}", entry.source.bold(), "(not available)".dimmed()),
        }
        if entry.hooks.is_empty() {
            println!("  {}", "no hooks".dimmed());
        }
        for hook in &entry.hooks {
            println!("  {}", hook.display());
        }
    }
}
