//! Contact CLI commands
//!
//! Implements the non-interactive contact subcommands.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_contact_details, format_contact_list};
use crate::error::{ContactBookError, ContactBookResult};
use crate::models::{Contact, ContactUpdate, Owner};
use crate::services::{ContactService, CreateContactInput};
use crate::storage::Storage;

/// Contact subcommands
#[derive(Subcommand)]
pub enum ContactCommands {
    /// Create a new contact
    Add {
        /// Contact name
        name: String,
        #[arg(short, long, default_value = "")]
        phone: String,
        #[arg(short, long, default_value = "")]
        email: String,
        #[arg(short, long, default_value = "")]
        address: String,
    },
    /// List contacts
    #[command(alias = "ls")]
    List {
        /// Only show contacts whose name, phone, email or address contains this
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show contact details
    Show {
        /// Contact name or ID
        contact: String,
    },
    /// Edit a contact; omitted fields keep their current value
    Edit {
        /// Contact name or ID
        contact: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Contact name or ID
        contact: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Look up a contact by exact name (case-insensitive)
    Search {
        /// Contact name
        name: String,
    },
}

/// Handle a contact command
pub fn handle_contact_command(
    storage: &Storage,
    settings: &Settings,
    owner: Option<&Owner>,
    cmd: ContactCommands,
) -> ContactBookResult<()> {
    let service = ContactService::new(storage);

    match cmd {
        ContactCommands::Add {
            name,
            phone,
            email,
            address,
        } => {
            let input = CreateContactInput::new(name).with_details(phone, email, address);
            let contact = service.create(owner, input)?;

            println!("Contact \"{}\" added successfully!", contact.name);
            println!("  ID: {}", contact.id);
        }

        ContactCommands::List { search } => {
            let contacts = service.list(owner, search.as_deref())?;
            print!("{}", format_contact_list(&contacts));
        }

        ContactCommands::Show { contact } => {
            let found = resolve(&service, owner, &contact)?;
            print!("{}", format_contact_details(&found, &settings.date_format));
        }

        ContactCommands::Edit {
            contact,
            name,
            phone,
            email,
            address,
        } => {
            let update = ContactUpdate {
                name,
                phone,
                email,
                address,
            };
            if update.is_empty() {
                return Err(ContactBookError::Validation(
                    "Nothing to update. Pass at least one of --name, --phone, --email, --address"
                        .into(),
                ));
            }

            let found = resolve(&service, owner, &contact)?;
            let updated = service.update(owner, found.id, &update)?;
            println!("Contact \"{}\" updated successfully!", updated.name);
        }

        ContactCommands::Delete { contact, force } => {
            let found = resolve(&service, owner, &contact)?;

            if !force {
                println!("About to delete contact: {}", found.name);
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(owner, found.id)?;
            println!("Contact \"{}\" deleted successfully!", deleted.name);
        }

        ContactCommands::Search { name } => match service.search_by_name(owner, &name)? {
            Some(found) => print!("{}", format_contact_details(&found, &settings.date_format)),
            None => return Err(ContactBookError::contact_not_found(name)),
        },
    }

    Ok(())
}

fn resolve(
    service: &ContactService<'_>,
    owner: Option<&Owner>,
    identifier: &str,
) -> ContactBookResult<Contact> {
    service
        .find(owner, identifier)?
        .ok_or_else(|| ContactBookError::contact_not_found(identifier))
}
