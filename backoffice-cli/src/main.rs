//! backoffice CLI - salon back office server and admin tooling
//!
//! - `serve` runs the HTTP API
//! - `list`, `set-status`, `create-user` and `purge` talk to a running
//!   server over HTTP

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "backoffice",
    author,
    version,
    about = "Salon back office API server and admin client",
    long_about = "Serve the salon back office REST API, or manage users, salons and \
                  contact messages of a running server from the terminal."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// List records of one kind with search, status filter and paging
    List(commands::admin::ListArgs),
    /// Set the status of a contact message
    SetStatus(commands::admin::SetStatusArgs),
    /// Create a user (missing fields take demo defaults)
    CreateUser(commands::admin::CreateUserArgs),
    /// Delete every user or every salon
    Purge(commands::admin::PurgeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::List(args) => commands::run_list(args).await?,
        Commands::SetStatus(args) => commands::run_set_status(args).await?,
        Commands::CreateUser(args) => commands::run_create_user(args).await?,
        Commands::Purge(args) => commands::run_purge(args).await?,
    }
    Ok(())
}
