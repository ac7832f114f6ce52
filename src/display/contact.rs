//! Contact display formatting
//!
//! Formats contacts for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Contact;

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            address: truncate(&contact.address, 40),
            id: contact.id.short(),
        }
    }
}

/// Format a list of contacts as a table
pub fn format_contact_list(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts found.\n".to_string();
    }

    let mut table = Table::new(contacts.iter().map(ContactRow::from));
    table.with(Style::psql());

    let noun = if contacts.len() == 1 { "contact" } else { "contacts" };
    format!("{}\n\nTotal: {} {}\n", table, contacts.len(), noun)
}

/// Format a single contact's details
pub fn format_contact_details(contact: &Contact, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name: {}\n", contact.name));
    output.push_str(&format!("  Phone:   {}\n", contact.phone));
    output.push_str(&format!("  Email:   {}\n", contact.email));
    output.push_str(&format!("  Address: {}\n", contact.address));
    output.push_str(&format!("  ID:      {}\n", contact.id));

    if let Some(owner) = &contact.owner {
        output.push_str(&format!("  Owner:   {}\n", owner));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        contact.created_at.format(date_format)
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        contact.updated_at.format(date_format)
    ));

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
