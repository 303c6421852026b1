use crate::quest::dates::DayId;
use crate::quest::paths::QuestPaths;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

/// One log mutation, appended as a JSONL line under `logs_dir/audit.log`.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub at_epoch_secs: u64,
    pub action: String,
    pub day: String,
    pub delta: u64,
    pub total: u64,
}

fn now_epoch_secs() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

pub fn append_mutation(
    paths: &QuestPaths,
    action: &str,
    day: &DayId,
    delta: u64,
    total: u64,
) -> Result<()> {
    fs::create_dir_all(&paths.logs_dir)
        .with_context(|| format!("failed to create {}", paths.logs_dir.display()))?;
    let event = AuditEvent {
        at_epoch_secs: now_epoch_secs()?,
        action: action.to_string(),
        day: day.as_str().to_string(),
        delta,
        total,
    };

    let line = format!("{}\n", serde_json::to_string(&event)?);
    use std::io::Write;
    let path = paths.logs_dir.join("audit.log");
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}
