//! Login event data structures
//!
//! A [`LoginEvent`] is built once from the request metadata handed over by the
//! authentication hook and is never modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user_agent::UserAgentInfo;
use crate::models::LoginEventId;

/// Coarse device category derived from the user agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
    #[default]
    Unknown,
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceType::Mobile => write!(f, "Mobile"),
            DeviceType::Tablet => write!(f, "Tablet"),
            DeviceType::Desktop => write!(f, "Desktop"),
            DeviceType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Raw request metadata observed at login time
///
/// Every field is optional; missing data degrades the event instead of
/// rejecting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// Raw `X-Forwarded-For` header
    pub forwarded_for: Option<String>,
    /// Address of the direct peer
    pub remote_addr: Option<String>,
    /// Raw `User-Agent` header
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// Client address: first forwarded hop if present, else the direct peer
    pub fn client_ip(&self) -> Option<String> {
        let forwarded = self
            .forwarded_for
            .as_deref()
            .and_then(|header| header.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        forwarded
            .or_else(|| {
                self.remote_addr
                    .as_deref()
                    .map(str::trim)
                    .filter(|ip| !ip.is_empty())
            })
            .map(str::to_string)
    }
}

/// One successful authentication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginEvent {
    pub id: LoginEventId,

    /// The authenticated principal
    pub user: String,

    /// When the login happened (UTC)
    pub login_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    /// The user agent exactly as received
    #[serde(default)]
    pub user_agent: String,

    #[serde(default)]
    pub device_type: DeviceType,

    /// `"{family} {version}"`, empty when no user agent was sent
    #[serde(default)]
    pub browser: String,

    /// `"{family} {version}"`, empty when no user agent was sent
    #[serde(default)]
    pub os: String,
}

impl LoginEvent {
    /// Build an event from the request metadata, stamped with the current time
    pub fn new(user: impl Into<String>, client: &ClientInfo) -> Self {
        let user_agent = client.user_agent.clone().unwrap_or_default();
        let info = UserAgentInfo::parse(&user_agent);

        Self {
            id: LoginEventId::new(),
            user: user.into(),
            login_time: Utc::now(),
            ip_address: client.client_ip(),
            user_agent,
            device_type: info.device,
            browser: info.browser.to_string(),
            os: info.os.to_string(),
        }
    }

    /// Format the event as a single log line
    pub fn format_human_readable(&self, date_format: &str) -> String {
        format!(
            "[{}] {} from {} on {} ({}, {})",
            self.login_time.format(date_format),
            self.user,
            self.ip_address.as_deref().unwrap_or("unknown address"),
            self.device_type,
            display_or_dash(&self.browser),
            display_or_dash(&self.os),
        )
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
