use crate::error::{QuestError, QuestWarnCode};
use crate::quest::dates::DayId;
use crate::quest::warn;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Date-keyed daily counts. Only strictly positive counts are ever stored;
/// a day that reaches zero is removed outright.
pub type ActivityLog = BTreeMap<DayId, u64>;

#[derive(Debug)]
pub struct LogStore {
    file: PathBuf,
    lock_file: PathBuf,
    entries: ActivityLog,
}

/// Missing or unparseable data reads as an empty log; the absence of data
/// is not an error. Invalid keys and non-positive counts are dropped.
fn load_from(file: &PathBuf) -> ActivityLog {
    let Ok(raw) = fs::read_to_string(file) else {
        return ActivityLog::new();
    };
    let Ok(parsed) = serde_json::from_str::<BTreeMap<String, u64>>(&raw) else {
        return ActivityLog::new();
    };
    sanitize(parsed)
}

pub fn sanitize(raw: BTreeMap<String, u64>) -> ActivityLog {
    let mut out = ActivityLog::new();
    for (key, count) in raw {
        if count == 0 {
            continue;
        }
        if let Ok(day) = DayId::parse(&key) {
            out.insert(day, count);
        }
    }
    out
}

impl LogStore {
    pub fn open(file: PathBuf, lock_file: PathBuf) -> Self {
        let entries = load_from(&file);
        Self {
            file,
            lock_file,
            entries,
        }
    }

    pub fn entries(&self) -> &ActivityLog {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.entries.values().sum()
    }

    pub fn count_for(&self, day: &DayId) -> u64 {
        self.entries.get(day).copied().unwrap_or(0)
    }

    /// Record `delta` push-ups for `day`. Durable before return.
    pub fn add_count(&mut self, day: &DayId, delta: u64) -> Result<()> {
        if delta == 0 {
            return Err(QuestError::ZeroCount.into());
        }
        *self.entries.entry(day.clone()).or_insert(0) += delta;
        self.persist()
    }

    /// Undo `delta` push-ups for `day`, clamping at zero. A day whose count
    /// reaches zero is deleted, never stored as an explicit zero entry.
    pub fn remove_count(&mut self, day: &DayId, delta: u64) -> Result<()> {
        if delta == 0 {
            return Err(QuestError::ZeroCount.into());
        }
        let next = self.count_for(day).saturating_sub(delta);
        if next == 0 {
            self.entries.remove(day);
        } else {
            self.entries.insert(day.clone(), next);
        }
        self.persist()
    }

    /// Replace the whole mapping (migration only). Durable before return.
    pub fn replace_all(&mut self, entries: ActivityLog) -> Result<()> {
        self.entries = entries;
        self.persist()
    }

    fn write_once(&self) -> Result<()> {
        let parent = self
            .file
            .parent()
            .ok_or_else(|| anyhow::anyhow!("log file has no parent directory"))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        let lock = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.lock_file)
            .with_context(|| format!("failed to open {}", self.lock_file.display()))?;
        lock.lock_exclusive()
            .with_context(|| format!("failed to lock {}", self.lock_file.display()))?;

        let result = (|| -> Result<()> {
            let data = serde_json::to_string_pretty(&self.entries)?;
            let mut tmp = NamedTempFile::new_in(parent)
                .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
            tmp.write_all(format!("{data}\n").as_bytes())
                .context("failed to write activity log temp file")?;
            tmp.persist(&self.file)
                .map_err(|err| anyhow::anyhow!("failed to persist {}: {err}", self.file.display()))?;
            Ok(())
        })();

        let _ = FileExt::unlock(&lock);
        result
    }

    /// Synchronous persistence with a single retry; a second failure is a
    /// recoverable error, never a silently dropped mutation.
    fn persist(&self) -> Result<()> {
        match self.write_once() {
            Ok(()) => Ok(()),
            Err(first) => {
                warn::emit(
                    QuestWarnCode::W001LogWriteRetry,
                    "persist",
                    &self.file.display().to_string(),
                    "first write attempt failed; retrying",
                    &format!("{first:#}"),
                );
                self.write_once().map_err(|second| {
                    QuestError::LogWriteFailed(format!("{second:#}")).into()
                })
            }
        }
    }
}
