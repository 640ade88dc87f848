//! To-do commands.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use basecamp_api::resources::{TodoFilter, TodoQuery};

use super::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct TodosCommand {
    #[command(subcommand)]
    pub command: TodosSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TodosSubcommand {
    /// List the to-dos of a project
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Project id
    #[arg(long)]
    pub project: u64,

    /// Only to-dos in this state
    #[arg(long, value_enum)]
    pub filter: Option<Filter>,

    /// Only to-dos due after this date (YYYY-MM-DD)
    #[arg(long)]
    pub due_since: Option<NaiveDate>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Completed,
    Remaining,
    Trashed,
}

impl From<Filter> for TodoFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Completed => TodoFilter::Completed,
            Filter::Remaining => TodoFilter::Remaining,
            Filter::Trashed => TodoFilter::Trashed,
        }
    }
}

pub async fn handle(cmd: TodosCommand) -> Result<()> {
    match cmd.command {
        TodosSubcommand::List(args) => list(args).await,
    }
}

async fn list(args: ListArgs) -> Result<()> {
    let client = args.account.client()?;
    let query = TodoQuery {
        filter: args.filter.map(TodoFilter::from),
        due_since: args.due_since,
    };

    let todos = client
        .todos()
        .list(args.project, &query)
        .await
        .context("Failed to list to-dos")?;

    if todos.is_empty() {
        output::status("No to-dos found.");
    }
    output::json(&todos, args.account.pretty)
}
