mod cmd_list;
mod cmd_project;
mod cmd_serve;
mod cmd_show;

use clap::{Parser, Subcommand};
use specdeck_projects::ProjectRegistry;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "specdeck", version, about = "OpenSpec change dashboard")]
struct Cli {
    /// Override the registry store directory
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage registered projects
    Project {
        #[command(subcommand)]
        cmd: ProjectCmd,
    },
    /// List a project's changes, most recently modified first
    List {
        /// Project id
        project: String,
        /// List archived changes instead of active ones
        #[arg(long)]
        archived: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one change with all its documents
    Show {
        /// Project id
        project: String,
        /// Change name
        change: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP API server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port
        #[arg(long, default_value_t = 4517)]
        port: u16,
    },
}

#[derive(Subcommand)]
enum ProjectCmd {
    /// Register a project or update its path
    Add {
        /// Project id
        id: String,
        /// Project root directory (omit to register without a path)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// List registered projects
    List,
    /// Remove a project from the registry
    Rm {
        /// Project id
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let registry = match cli.store {
        Some(store) => ProjectRegistry::open(store),
        None => ProjectRegistry::open_default(),
    };

    match cli.cmd {
        Command::Project { cmd } => match cmd {
            ProjectCmd::Add { id, path } => cmd_project::add(&registry, &id, path.as_deref()),
            ProjectCmd::List => cmd_project::list(&registry),
            ProjectCmd::Rm { id } => cmd_project::remove(&registry, &id),
        },
        Command::List {
            project,
            archived,
            json,
        } => cmd_list::execute(&registry, &project, archived, json),
        Command::Show {
            project,
            change,
            json,
        } => cmd_show::execute(&registry, &project, &change, json),
        Command::Serve { bind, port } => cmd_serve::execute(registry, &bind, port),
    }
}
