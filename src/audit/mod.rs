//! Login auditing
//!
//! Records one immutable entry per successful authentication in an
//! append-only history file.
//!
//! - `LoginEvent`: the entry itself, with the client address and the
//!   device/browser/OS classification of its user agent.
//! - `LoginLog`: appends entries as JSON lines and reads them back. It has no
//!   update or delete operation.
//! - `UserAgentInfo`: best-effort user-agent parser used to fill the event.
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_book::audit::{ClientInfo, LoginEvent, LoginLog};
//!
//! let log = LoginLog::new(paths.logins_file());
//! let event = LoginEvent::new("alice", &ClientInfo {
//!     forwarded_for: Some("203.0.113.7, 10.0.0.1".into()),
//!     remote_addr: None,
//!     user_agent: Some(user_agent_header),
//! });
//! log.append(&event)?;
//! ```

mod entry;
mod logger;
pub mod user_agent;

pub use entry::{ClientInfo, DeviceType, LoginEvent};
pub use logger::LoginLog;
pub use user_agent::{Family, UserAgentInfo};
