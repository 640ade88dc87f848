//! Project commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::AccountArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ProjectsCommand {
    #[command(subcommand)]
    pub command: ProjectsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsSubcommand {
    /// List active projects
    List(ListArgs),

    /// Fetch a single project
    Get(GetArgs),

    /// Create a project
    Create(CreateArgs),

    /// Archive or restore a project
    Archive(ArchiveArgs),

    /// Delete a project
    Remove(GetArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// List archived projects instead
    #[arg(long)]
    pub archived: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Project id
    #[arg(long)]
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Project name
    #[arg(long)]
    pub name: String,

    /// Project description
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Args, Debug)]
pub struct ArchiveArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Project id
    #[arg(long)]
    pub id: u64,

    /// Restore the project instead of archiving it
    #[arg(long)]
    pub restore: bool,
}

pub async fn handle(cmd: ProjectsCommand) -> Result<()> {
    match cmd.command {
        ProjectsSubcommand::List(args) => list(args).await,
        ProjectsSubcommand::Get(args) => get(args).await,
        ProjectsSubcommand::Create(args) => create(args).await,
        ProjectsSubcommand::Archive(args) => archive(args).await,
        ProjectsSubcommand::Remove(args) => remove(args).await,
    }
}

async fn list(args: ListArgs) -> Result<()> {
    let client = args.account.client()?;
    let projects = if args.archived {
        client.projects().list_archived().await
    } else {
        client.projects().list().await
    }
    .context("Failed to list projects")?;

    if projects.is_empty() {
        output::status("No projects found.");
    }
    output::json(&projects, args.account.pretty)
}

async fn get(args: GetArgs) -> Result<()> {
    let client = args.account.client()?;
    let project = client
        .projects()
        .get(args.id)
        .await
        .context("Failed to fetch project")?;

    output::json(&project, args.account.pretty)
}

async fn create(args: CreateArgs) -> Result<()> {
    let client = args.account.client()?;
    let project = client
        .projects()
        .create(&args.name, &args.description)
        .await
        .context("Failed to create project")?;

    output::success(&format!("Created project {}", project.id));
    output::json(&project, args.account.pretty)
}

async fn archive(args: ArchiveArgs) -> Result<()> {
    let client = args.account.client()?;
    let project = client
        .projects()
        .archive(args.id, !args.restore)
        .await
        .context("Failed to update project")?;

    let verb = if args.restore { "Restored" } else { "Archived" };
    output::success(&format!("{verb} project {}", project.id));
    output::json(&project, args.account.pretty)
}

async fn remove(args: GetArgs) -> Result<()> {
    let client = args.account.client()?;
    client
        .projects()
        .remove(args.id)
        .await
        .context("Failed to delete project")?;

    output::success(&format!("Deleted project {}", args.id));
    Ok(())
}
