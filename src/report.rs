//! Terminal tables for the `users` and `provision` commands.

use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};

use crate::models::{ProvisionReport, UserRecord, UserStatus};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

/// Desired users as a table. Passwords are never shown.
pub fn users_table(users: &[UserRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Login", "Email", "Role"]);
    for u in users {
        table.add_row(vec![u.login.as_str(), u.email.as_str(), u.role.as_str()]);
    }
    table
}

/// What `grafprov users` prints for a loaded file.
pub fn render_users(users: &[UserRecord]) -> String {
    if users.is_empty() {
        return "(empty list)".to_string();
    }
    format!("\n{}\n", users_table(users))
}

/// One row per user: login, outcome, detail.
pub fn outcome_table(report: &ProvisionReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Login", "Outcome", "Detail"]);
    for o in &report.outcomes {
        let (outcome, detail) = match &o.status {
            UserStatus::Created { role } => ("created".to_string(), format!("role {}", role)),
            UserStatus::Skipped => ("skipped".to_string(), "already exists".to_string()),
            UserStatus::Failed { stage, error } => (format!("failed ({})", stage), error.to_string()),
        };
        table.add_row(vec![o.login.clone(), outcome, detail]);
    }
    table
}

pub fn summary(report: &ProvisionReport) -> String {
    format!(
        "{} created, {} skipped, {} failed",
        report.created(),
        report.skipped(),
        report.failed()
    )
}
