pub mod add;
pub mod breakdown;
pub mod calendar;
pub mod capture;
pub mod export;
pub mod gallery;
pub mod remove;
pub mod stats;
pub mod status;
pub mod timelapse;
pub mod verify;

use crate::quest::config::load_config;
use crate::quest::paths::resolve_paths;
use crate::quest::session::Session;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }
}

/// Resolve paths and config, then boot a session (running any pending
/// legacy migration). Shared entry point for every subcommand.
pub fn boot_session() -> Result<Session> {
    let paths = resolve_paths()?;
    let config = load_config()?;
    Session::boot(paths, config)
}

pub fn note_migration(report: &mut CommandReport, session: &Session) {
    if let Some(source) = session.migrated_from() {
        report.detail(format!("migrated legacy data from {source}"));
    }
}
