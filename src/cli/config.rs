//! Configuration CLI commands

use clap::Subcommand;

use crate::config::{ContactBookPaths, Settings};
use crate::error::{ContactBookError, ContactBookResult};
use crate::models::Owner;

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set the owner used when --user is not given; omit NAME to clear it
    SetOwner {
        name: Option<String>,
    },
    /// Set the default number of entries shown by `login history`
    SetHistoryLimit {
        limit: usize,
    },
}

/// Show or change configuration
pub fn handle_config_command(
    paths: &ContactBookPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> ContactBookResult<()> {
    match cmd {
        None => print_config(paths, settings),

        Some(ConfigCommands::SetOwner { name }) => {
            let owner = name.as_deref().and_then(Owner::parse);
            settings.default_owner = owner.as_ref().map(|o| o.as_str().to_string());
            settings.save(paths)?;

            match owner {
                Some(owner) => println!("Default owner set to {}", owner),
                None => println!("Default owner cleared (single-user mode)"),
            }
        }

        Some(ConfigCommands::SetHistoryLimit { limit }) => {
            if limit == 0 {
                return Err(ContactBookError::Validation(
                    "History limit must be at least 1".into(),
                ));
            }
            settings.history_limit = limit;
            settings.save(paths)?;
            println!("Login history limit set to {}", limit);
        }
    }

    Ok(())
}

fn print_config(paths: &ContactBookPaths, settings: &Settings) {
    println!("Contact Book Configuration");
    println!("==========================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Contacts file:   {}", paths.contacts_file().display());
    println!("Login history:   {}", paths.logins_file().display());
    println!();
    println!("Settings:");
    println!(
        "  Default owner:  {}",
        settings
            .default_owner
            .as_deref()
            .unwrap_or("(none, single-user mode)")
    );
    println!("  History limit:  {}", settings.history_limit);
    println!("  Date format:    {}", settings.date_format);
    println!("  Log level:      {}", settings.log_level);
}
