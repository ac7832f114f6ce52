//! Login history display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::audit::LoginEvent;

#[derive(Tabled)]
struct LoginRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "IP Address")]
    ip: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Browser")]
    browser: String,
    #[tabled(rename = "OS")]
    os: String,
}

/// Format a user's login history as a table
pub fn format_login_history(events: &[LoginEvent], date_format: &str) -> String {
    if events.is_empty() {
        return "No login history.\n".to_string();
    }

    let rows = events.iter().map(|event| LoginRow {
        time: event.login_time.format(date_format).to_string(),
        ip: event.ip_address.clone().unwrap_or_else(|| "-".to_string()),
        device: event.device_type.to_string(),
        browser: event.browser.clone(),
        os: event.os.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}
