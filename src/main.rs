use crate::areas::repository::Repository;
use crate::errors::Fatal;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;
mod errors;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A simple git-like version control system",
    long_about = "Gitlet is a simplified, single-user, local version-control system. \
    It records snapshots of the working directory as immutable commits, \
    supports multiple named branches, and merges divergent branches with \
    textual conflict markers.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
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
        long_about = "This command creates a .gitlet directory in the current directory, \
        with an initial commit and a 'main' branch pointing at it."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage it for removal if it is tracked"
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit in the repository")]
    GlobalLog,
    #[command(name = "find", about = "List commits whose message contains the query")]
    Find {
        #[arg(index = 1, help = "The message substring to search for")]
        query: String,
    },
    #[command(name = "status", about = "Show branches, staged changes, and untracked files")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch to a branch",
        long_about = "Three forms: 'checkout -- <file>' restores a file from the head commit, \
        'checkout <commit> -- <file>' restores it from the given commit \
        (short hashes accepted), and 'checkout <branch>' switches branches."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when followed by -- <file>")]
        target: Option<String>,
        #[arg(index = 2, last = true, num_args = 0..=1, help = "The file to restore")]
        file: Vec<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current head")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch ref")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "reset", about = "Hard-reset the current branch to a commit")]
    Reset {
        #[arg(index = 1, help = "The target commit id (short hashes accepted)")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge from")]
        branch: String,
    },
    #[command(
        name = "add-remote",
        about = "Register a remote Gitlet directory reference"
    )]
    AddRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
        #[arg(index = 2, help = "Path to the remote .gitlet directory")]
        location: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => handle_parse_error(err),
    };

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

    if !matches!(cli.command, Commands::Init) {
        repository.ensure_initialized()?;
    }

    match &cli.command {
        Commands::Init => repository.init().await,
        Commands::Add { file } => repository.add(file).await,
        Commands::Commit { message } => repository.commit(message).await,
        Commands::Rm { file } => repository.rm(file).await,
        Commands::Log => repository.log().await,
        Commands::GlobalLog => repository.global_log().await,
        Commands::Find { query } => repository.find(query).await,
        Commands::Status => repository.status().await,
        Commands::Checkout { target, file } => {
            dispatch_checkout(&repository, target.as_deref(), file).await
        }
        Commands::Branch { name } => repository.branch(name).await,
        Commands::RmBranch { name } => repository.rm_branch(name).await,
        Commands::Reset { commit } => repository.reset(commit).await,
        Commands::Merge { branch } => repository.merge(branch).await,
        Commands::AddRemote { name, location } => repository.add_remote(name, location).await,
    }
}

async fn dispatch_checkout(
    repository: &Repository,
    target: Option<&str>,
    file: &[String],
) -> Result<()> {
    match (target, file) {
        (Some(branch), []) => repository.checkout_branch(branch).await,
        (None, [file]) => repository.checkout_file_from_head(file).await,
        (Some(commit), [file]) => repository.checkout_file(commit, file).await,
        _ => Err(Fatal::IncorrectOperands.into()),
    }
}

/// Map clap's own diagnostics onto the fixed fatal messages; help and
/// version requests pass through untouched.
fn handle_parse_error(err: clap::Error) -> ! {
    let fatal = match err.kind() {
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand | ErrorKind::MissingSubcommand => {
            Some(Fatal::NoCommand)
        }
        ErrorKind::InvalidSubcommand => Some(Fatal::UnknownCommand),
        ErrorKind::MissingRequiredArgument
        | ErrorKind::UnknownArgument
        | ErrorKind::InvalidValue
        | ErrorKind::TooManyValues
        | ErrorKind::WrongNumberOfValues => Some(Fatal::IncorrectOperands),
        _ => None,
    };

    match fatal {
        Some(fatal) => {
            eprintln!("{fatal}");
            std::process::exit(1);
        }
        None => err.exit(),
    }
}
