use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use sprig::areas::repository::Repository;
use sprig::artifacts::core::PagerWriter;
use sprig::commands::porcelain::checkout::CheckoutTarget;

#[derive(Parser)]
#[command(
    name = "sprig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal single-user version-control system",
    long_about = "sprig records snapshots of a working directory as commits, \
    keeps named branches over them and merges branches with a three-way merge.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .sprig directory, the shared root commit and the master branch."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage the current content of a file")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "rm", about = "Unstage a file and stop tracking it")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged snapshot",
        long_about = "This command creates a new commit on the current branch from the staged changes."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the first-parent history of HEAD")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of the commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and working tree status")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from HEAD, \
        checkout <commit> -- <file> restores it from another commit \
        and checkout <branch> switches to a branch."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or commit id when a file follows")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at HEAD")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn open_repository(with_pager: Option<&Pager>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    let writer: Box<dyn std::io::Write> = match with_pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    Repository::new(&pwd.to_string_lossy(), writer)
}

fn history_pager() -> Option<Pager> {
    if std::env::var_os("NO_PAGER").is_some() || !std::io::stdout().is_terminal() {
        return None;
    }

    Some(Pager::new())
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => open_repository(None)?,
            };

            repository.init().await?
        }
        Commands::Add { file } => open_repository(None)?.add(file).await?,
        Commands::Rm { file } => open_repository(None)?.rm(file).await?,
        Commands::Commit { message } => {
            open_repository(None)?.commit(message).await?;
        }
        Commands::Log | Commands::GlobalLog => {
            let pager = history_pager();
            let repository = open_repository(pager.as_ref())?;

            if matches!(cli.command, Commands::Log) {
                repository.log()?;
            } else {
                repository.global_log()?;
            }
            drop(repository);

            if let Some(pager) = pager {
                minus::page_all(pager)?;
            }
        }
        Commands::Find { message } => {
            open_repository(None)?.find(message)?;
        }
        Commands::Status => {
            open_repository(None)?.status().await?;
        }
        Commands::Checkout { target, file } => {
            let target = CheckoutTarget::from_operands(target.as_deref(), file.as_deref())?;
            open_repository(None)?.checkout(&target).await?
        }
        Commands::Branch { name } => open_repository(None)?.branch(name)?,
        Commands::RmBranch { name } => open_repository(None)?.rm_branch(name)?,
        Commands::Reset { commit } => open_repository(None)?.reset(commit).await?,
        Commands::Merge { branch } => {
            open_repository(None)?.merge(branch).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
