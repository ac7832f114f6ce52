//! Display formatting for terminal output

pub mod contact;
pub mod login;

pub use contact::{format_contact_details, format_contact_list};
pub use login::format_login_history;
