//! Interactive numbered menu
//!
//! Reads choices line by line from any `BufRead` and writes to any `Write`,
//! so the loop can be driven from stdin or from a test buffer. Domain errors
//! are printed and the loop continues; end of input behaves like Exit.
//! Each action persists on its own, so Exit writes nothing.

use std::io::{BufRead, Write};

use crate::config::Settings;
use crate::display::{format_contact_details, format_contact_list};
use crate::error::ContactBookResult;
use crate::models::{Contact, ContactUpdate, Owner};
use crate::services::{ContactService, CreateContactInput};
use crate::storage::Storage;

const MENU: &str = "\n\
Contact Book Menu\n\
1. Create Contact\n\
2. View All Contacts\n\
3. Update Contact\n\
4. Delete Contact\n\
5. Search Contact\n\
6. Exit\n";

/// Interactive session bound to one owner's contacts
pub struct Menu<'a, R, W> {
    storage: &'a Storage,
    settings: &'a Settings,
    owner: Option<&'a Owner>,
    input: R,
    output: W,
}

enum Flow {
    Continue,
    Exit,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        storage: &'a Storage,
        settings: &'a Settings,
        owner: Option<&'a Owner>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            storage,
            settings,
            owner,
            input,
            output,
        }
    }

    /// Run until the user picks Exit or input runs out
    pub fn run(&mut self) -> ContactBookResult<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return self.exit();
            };

            let flow = match choice.as_str() {
                "1" => self.create()?,
                "2" => self.view_all()?,
                "3" => self.update()?,
                "4" => self.delete()?,
                "5" => self.search()?,
                "6" => {
                    return self.exit();
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                return self.exit();
            }
        }
    }

    fn service(&self) -> ContactService<'a> {
        ContactService::new(self.storage)
    }

    fn create(&mut self) -> ContactBookResult<Flow> {
        let Some(name) = self.prompt("Enter name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(phone) = self.prompt("Enter phone: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(email) = self.prompt("Enter email: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(address) = self.prompt("Enter address: ")? else {
            return Ok(Flow::Exit);
        };

        let input = CreateContactInput::new(name).with_details(phone, email, address);
        match self.service().create(self.owner, input) {
            Ok(contact) => writeln!(self.output, "Contact {} added successfully.", contact.name)?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }

        Ok(Flow::Continue)
    }

    fn view_all(&mut self) -> ContactBookResult<Flow> {
        match self.service().list(self.owner, None) {
            Ok(contacts) => write!(self.output, "{}", format_contact_list(&contacts))?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }

        Ok(Flow::Continue)
    }

    fn update(&mut self) -> ContactBookResult<Flow> {
        let Some(contact) = self.lookup("Enter the name of the contact to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(contact) = contact else {
            return Ok(Flow::Continue);
        };

        writeln!(self.output, "Leave field empty to keep current value.")?;

        let mut update = ContactUpdate::default();
        for (label, current, slot) in [
            ("name", contact.name.clone(), &mut update.name),
            ("phone", contact.phone.clone(), &mut update.phone),
            ("email", contact.email.clone(), &mut update.email),
            ("address", contact.address.clone(), &mut update.address),
        ] {
            let Some(value) = self.prompt(&format!("Enter new {} ({}): ", label, current))? else {
                return Ok(Flow::Exit);
            };
            if !value.is_empty() {
                *slot = Some(value);
            }
        }

        match self.service().update(self.owner, contact.id, &update) {
            Ok(updated) => {
                writeln!(self.output, "Contact {} updated successfully.", updated.name)?
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }

        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> ContactBookResult<Flow> {
        let Some(contact) = self.lookup("Enter the name of the contact to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(contact) = contact else {
            return Ok(Flow::Continue);
        };

        match self.service().delete(self.owner, contact.id) {
            Ok(deleted) => {
                writeln!(self.output, "Contact {} deleted successfully.", deleted.name)?
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }

        Ok(Flow::Continue)
    }

    fn search(&mut self) -> ContactBookResult<Flow> {
        let Some(contact) = self.lookup("Enter the name of the contact to search: ")? else {
            return Ok(Flow::Exit);
        };

        if let Some(contact) = contact {
            write!(
                self.output,
                "{}",
                format_contact_details(&contact, &self.settings.date_format)
            )?;
        }

        Ok(Flow::Continue)
    }

    /// Every change is already on disk by the time the user leaves
    fn exit(&mut self) -> ContactBookResult<()> {
        writeln!(self.output, "Contacts saved. Exiting...")?;
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    /// Prompt for a name and look it up; `None` means input ran out,
    /// `Some(None)` means the contact was not found (already reported).
    fn lookup(&mut self, prompt: &str) -> ContactBookResult<Option<Option<Contact>>> {
        let Some(name) = self.prompt(prompt)? else {
            return Ok(None);
        };

        match self.service().search_by_name(self.owner, &name) {
            Ok(Some(contact)) => Ok(Some(Some(contact))),
            Ok(None) => {
                writeln!(self.output, "Contact not found.")?;
                Ok(Some(None))
            }
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                Ok(Some(None))
            }
        }
    }

    /// Write a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> ContactBookResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }
}
