//! Login audit CLI commands
//!
//! `record` is the hook an authentication front end calls after a
//! successful sign-in; `history` shows the signed-in user's recent logins.

use clap::Subcommand;

use crate::audit::ClientInfo;
use crate::config::Settings;
use crate::display::format_login_history;
use crate::error::{ContactBookError, ContactBookResult};
use crate::models::Owner;
use crate::services::LoginService;
use crate::storage::Storage;

/// Login subcommands
#[derive(Subcommand)]
pub enum LoginCommands {
    /// Record a successful login for the current user
    Record {
        /// Value of the X-Forwarded-For header
        #[arg(long)]
        forwarded_for: Option<String>,
        /// Socket peer address
        #[arg(long)]
        remote_addr: Option<String>,
        /// Value of the User-Agent header
        #[arg(long)]
        user_agent: Option<String>,
    },
    /// Show the current user's most recent logins
    History {
        /// Number of entries to show (defaults to the configured history limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a login command
pub fn handle_login_command(
    storage: &Storage,
    settings: &Settings,
    owner: Option<&Owner>,
    cmd: LoginCommands,
) -> ContactBookResult<()> {
    let user = owner.ok_or_else(|| {
        ContactBookError::Validation(
            "A user is required. Pass --user or set CONTACT_BOOK_USER".into(),
        )
    })?;
    let service = LoginService::new(storage);

    match cmd {
        LoginCommands::Record {
            forwarded_for,
            remote_addr,
            user_agent,
        } => {
            let client = ClientInfo {
                forwarded_for,
                remote_addr,
                user_agent,
            };
            let event = service.record(user.as_str(), &client)?;

            println!("Recorded login for {}", event.user);
            println!("  {}", event.format_human_readable(&settings.date_format));
        }

        LoginCommands::History { limit } => {
            let limit = limit.unwrap_or(settings.history_limit);
            let events = service.list_recent(user.as_str(), limit)?;
            print!("{}", format_login_history(&events, &settings.date_format));
        }
    }

    Ok(())
}
