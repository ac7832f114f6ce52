//! Core data models for the contact book

pub mod contact;
pub mod ids;
pub mod owner;

pub use contact::{Contact, ContactUpdate, ContactValidationError};
pub use ids::{ContactId, LoginEventId};
pub use owner::Owner;
