mod api;
mod cli;
mod client;
mod commands;
mod config;
mod confirm;
mod console;
mod error;
mod export;
mod output;
mod session;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Commands, ContactCommands, ExportCommands, PaymentCommands, TeamCommands,
};
use client::AdminClient;
use config::Config;
use error::{AdminError, Result};
use session::SessionStore;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        // Already shown as a notification
        if matches!(e, AdminError::Reported) {
            std::process::exit(1);
        }

        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "teamadm=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't need a session
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "teamadm", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        Commands::Login { email } => {
            let config = Config::load()?;
            let store = SessionStore::default_location()?;
            commands::auth::login(&config, &store, email).await?;
        }
        Commands::Logout => {
            commands::auth::logout(&SessionStore::default_location()?)?;
        }
        Commands::Whoami => {
            let config = Config::load()?;
            commands::auth::whoami(&config, &SessionStore::default_location()?)?;
        }
        // Everything else talks to the API as an admin
        command => {
            let config = Config::load()?;
            let store = SessionStore::default_location()?;
            let session = store.resolve()?.require_admin()?;
            let client = AdminClient::new(&config, store)?.with_session(session);

            match command {
                Commands::Console(args) => {
                    commands::shell::run(client, &config, args.criteria()).await?;
                }
                Commands::Teams(args) => {
                    commands::teams::list(client, args).await?;
                }
                Commands::Team { action } => match action {
                    TeamCommands::List(args) => commands::teams::list(client, args).await?,
                    TeamCommands::Show(target) => commands::teams::show(client, target).await?,
                    TeamCommands::Verify(target) => {
                        commands::teams::toggle_verification(client, target).await?
                    }
                    TeamCommands::Delete(args) => commands::teams::delete(client, args).await?,
                },
                Commands::Payment { action } => match action {
                    PaymentCommands::Verify(target) => {
                        commands::payments::verify(client, target).await?
                    }
                    PaymentCommands::Reject(args) => commands::payments::reject(client, args).await?,
                },
                Commands::Stats { view } => {
                    commands::stats::run(client, view).await?;
                }
                Commands::Departments => {
                    commands::stats::departments(client).await?;
                }
                Commands::Export { kind } => match kind {
                    ExportCommands::Csv { event, out } => {
                        commands::export::csv(client, &config, event, out).await?
                    }
                    ExportCommands::All { out } => {
                        commands::export::all(client, &config, out).await?
                    }
                },
                Commands::Contacts { action } => match action {
                    ContactCommands::List { unread } => {
                        commands::contacts::list(client, unread).await?
                    }
                    ContactCommands::Read { id } => {
                        commands::contacts::mark_read(client, id).await?
                    }
                },
                Commands::Completions { .. }
                | Commands::Init
                | Commands::Login { .. }
                | Commands::Logout
                | Commands::Whoami => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
