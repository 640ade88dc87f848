//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::projects::ProjectsCommand;
use crate::commands::todos::TodosCommand;

/// Basecamp CLI tool for API exploration.
#[derive(Parser, Debug)]
#[command(name = "bcx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launchpad authorization flow
    Auth(AuthCommand),

    /// Project operations
    Projects(ProjectsCommand),

    /// To-do operations
    Todos(TodosCommand),
}
