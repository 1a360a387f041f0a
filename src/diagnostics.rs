//! Persistence diagnostics for `GET /test` and `kollny status`.
//!
//! Reports whether a database is configured, whether it could be opened, and
//! which collections it holds. Failures are rendered into the report (error
//! text truncated to [`ERROR_TEXT_LIMIT`] characters); building the report
//! never fails.

use serde::Serialize;

use kollny_core::store::DocumentStore;

use crate::config::Config;

/// Maximum characters of an error message included in a report.
pub const ERROR_TEXT_LIMIT: usize = 50;

/// Maximum collection names listed in a report.
pub const COLLECTION_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// The state of the persistence collaborator as seen by the server.
pub enum StoreStatus<'a> {
    /// No `[db]` configured.
    NotConfigured,
    /// Configured but opening it failed.
    Failed(&'a str),
    Open(&'a dyn DocumentStore),
}

fn set_marker(present: bool) -> String {
    let marker = if present { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}

/// First [`ERROR_TEXT_LIMIT`] characters of `msg`.
pub fn truncate_error(msg: &str) -> String {
    msg.chars().take(ERROR_TEXT_LIMIT).collect()
}

pub async fn build_report(config: &Config, status: StoreStatus<'_>) -> DiagnosticsReport {
    let mut report = DiagnosticsReport {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_marker(config.db.is_some()),
        database_name: set_marker(config.db.as_ref().is_some_and(|db| db.name.is_some())),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    match status {
        StoreStatus::NotConfigured => {}
        StoreStatus::Failed(err) => {
            report.database = format!("❌ Error: {}", truncate_error(err));
        }
        StoreStatus::Open(store) => {
            report.connection_status = "Connected".to_string();
            match store.list_collections().await {
                Ok(mut names) => {
                    names.truncate(COLLECTION_LIMIT);
                    report.collections = names;
                    report.database = "✅ Connected & Working".to_string();
                }
                Err(e) => {
                    report.database =
                        format!("⚠️  Connected but Error: {}", truncate_error(&e.to_string()));
                }
            }
        }
    }

    report
}

/// Print the report for the `status` command.
pub fn print_report(report: &DiagnosticsReport) {
    println!("{:<18} {}", "backend", report.backend);
    println!("{:<18} {}", "database", report.database);
    println!("{:<18} {}", "database_url", report.database_url);
    println!("{:<18} {}", "database_name", report.database_name);
    println!("{:<18} {}", "connection_status", report.connection_status);
    if report.collections.is_empty() {
        println!("{:<18} (none)", "collections");
    } else {
        println!("{:<18} {}", "collections", report.collections.join(", "));
    }
}
