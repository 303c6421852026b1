use crate::error::QuestError;
use crate::quest::milestones::MILESTONE_UNIT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Metadata sidecar persisted next to each payload blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoMeta {
    pub milestone: u64,
    pub date: String,
    pub sha256: String,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
pub struct PhotoRecord {
    pub milestone: u64,
    pub date: String,
    pub sha256: String,
    pub bytes: u64,
    pub payload_file: PathBuf,
}

/// Blob store keyed by milestone (0 is the baseline "before" capture). Each
/// record is a payload file plus a JSON metadata sidecar; lifecycle is fully
/// independent of the activity log.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

fn record_stem(milestone: u64) -> String {
    format!("ms-{milestone:06}")
}

pub fn payload_digest(payload: &[u8]) -> String {
    format!("{:x}", Sha256::digest(payload))
}

impl PhotoStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn meta_path(&self, milestone: u64) -> PathBuf {
        self.dir.join(format!("{}.json", record_stem(milestone)))
    }

    fn payload_path(&self, milestone: u64) -> PathBuf {
        self.dir.join(format!("{}.img", record_stem(milestone)))
    }

    pub fn has(&self, milestone: u64) -> bool {
        self.meta_path(milestone).is_file()
    }

    fn unavailable(&self, err: impl std::fmt::Display) -> QuestError {
        QuestError::StorageUnavailable(format!("{}: {err}", self.dir.display()))
    }

    /// Upsert the record for `milestone`, overwriting any prior capture
    /// (retake semantics). The payload is fully persisted before return.
    pub fn put(
        &self,
        milestone: u64,
        payload: &[u8],
        captured_at: &str,
    ) -> Result<PhotoRecord, QuestError> {
        if milestone % MILESTONE_UNIT != 0 {
            return Err(QuestError::InvalidMilestone(milestone));
        }
        fs::create_dir_all(&self.dir).map_err(|err| self.unavailable(err))?;

        let payload_file = self.payload_path(milestone);
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|err| self.unavailable(err))?;
        tmp.write_all(payload).map_err(|err| self.unavailable(err))?;
        tmp.persist(&payload_file)
            .map_err(|err| self.unavailable(err))?;

        let meta = PhotoMeta {
            milestone,
            date: captured_at.to_string(),
            sha256: payload_digest(payload),
            bytes: payload.len() as u64,
        };
        let data = serde_json::to_string_pretty(&meta).map_err(|err| self.unavailable(err))?;
        fs::write(self.meta_path(milestone), format!("{data}\n"))
            .map_err(|err| self.unavailable(err))?;

        Ok(PhotoRecord {
            milestone: meta.milestone,
            date: meta.date,
            sha256: meta.sha256,
            bytes: meta.bytes,
            payload_file,
        })
    }

    /// Every stored record, ascending by milestone so the baseline sorts
    /// first. Records with unreadable metadata or a missing payload are
    /// skipped rather than failing the scan.
    pub fn get_all(&self) -> Result<Vec<PhotoRecord>, QuestError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let read_dir = fs::read_dir(&self.dir).map_err(|err| self.unavailable(err))?;

        let mut records = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|err| self.unavailable(err))?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Ok(raw) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(meta) = serde_json::from_str::<PhotoMeta>(&raw) else {
                continue;
            };
            let payload_file = self.payload_path(meta.milestone);
            if !payload_file.is_file() {
                continue;
            }
            records.push(PhotoRecord {
                milestone: meta.milestone,
                date: meta.date,
                sha256: meta.sha256,
                bytes: meta.bytes,
                payload_file,
            });
        }

        records.sort_by_key(|r| r.milestone);
        Ok(records)
    }

    pub fn read_payload(&self, record: &PhotoRecord) -> Result<Vec<u8>> {
        fs::read(&record.payload_file)
            .with_context(|| format!("failed to read {}", record.payload_file.display()))
    }
}
