//! Contact Book - per-user contact management with a login audit trail
//!
//! Each authenticated user owns a private set of contacts, unique by
//! case-insensitive name. Successful logins are appended to an audit log
//! together with the client's IP address and a classification of its
//! user agent.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Contacts, owners and identifiers
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Login events and user-agent classification
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_book::config::{ContactBookPaths, Settings};
//! use contact_book::services::{ContactService, CreateContactInput};
//! use contact_book::storage::Storage;
//!
//! let paths = ContactBookPaths::new()?;
//! let storage = Storage::open(&paths)?;
//! ContactService::new(&storage).create(None, CreateContactInput::new("Alice"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::ContactBookError;
