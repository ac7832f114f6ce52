//! Service layer for the contact book
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, ownership scoping and uniqueness.

pub mod contact;
pub mod login;

pub use contact::{ContactService, CreateContactInput};
pub use login::LoginService;
