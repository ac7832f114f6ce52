use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use contact_book::cli::{
    handle_config_command, handle_contact_command, handle_export_command, handle_login_command,
    ConfigCommands, ContactCommands, LoginCommands, Menu,
};
use contact_book::config::{ContactBookPaths, Settings};
use contact_book::export::ExportFormat;
use contact_book::models::Owner;
use contact_book::storage::Storage;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "CONTACT_BOOK_LOG";

#[derive(Parser)]
#[command(
    name = "contacts",
    version,
    about = "Per-user contact book with a login audit trail",
    long_about = "Contact Book keeps a private list of contacts for each user, \
                  unique by case-insensitive name, and records every successful \
                  login with the client's address, device, browser and OS."
)]
struct Cli {
    /// User whose contacts to work with (falls back to the configured default owner)
    #[arg(short, long, global = true, env = "CONTACT_BOOK_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (the default with no subcommand)
    Menu,

    #[command(flatten)]
    Contact(ContactCommands),

    /// Login audit commands
    #[command(subcommand)]
    Login(LoginCommands),

    /// Export the current user's contacts
    Export {
        /// Output format (csv, json, yaml)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
        /// Output file path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ContactBookPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);

    let owner = cli
        .user
        .as_deref()
        .and_then(Owner::parse)
        .or_else(|| settings.default_owner.as_deref().and_then(Owner::parse));

    // Initialize storage
    let storage = Storage::open(&paths)?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin();
            Menu::new(
                &storage,
                &settings,
                owner.as_ref(),
                stdin.lock(),
                io::stdout(),
            )
            .run()?;
        }
        Commands::Contact(cmd) => {
            handle_contact_command(&storage, &settings, owner.as_ref(), cmd)?;
        }
        Commands::Login(cmd) => {
            handle_login_command(&storage, &settings, owner.as_ref(), cmd)?;
        }
        Commands::Export { format, output } => {
            handle_export_command(&storage, owner.as_ref(), format, output)?;
        }
        Commands::Config { action } => {
            handle_config_command(&paths, &mut settings, action)?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("contact_book={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}
