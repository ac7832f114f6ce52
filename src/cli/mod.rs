//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod contact;
pub mod export;
pub mod login;
pub mod menu;

pub use config::{handle_config_command, ConfigCommands};
pub use contact::{handle_contact_command, ContactCommands};
pub use export::handle_export_command;
pub use login::{handle_login_command, LoginCommands};
pub use menu::Menu;
