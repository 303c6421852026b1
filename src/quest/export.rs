use crate::quest::milestones::MILESTONE_UNIT;
use crate::quest::photos::PhotoRecord;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub name: String,
    pub source: PathBuf,
}

/// Deterministic archive layout for the full gallery sequence: the baseline
/// gets a distinct name, milestone records get a stable zero-padded index
/// plus the level number and the raw push-up count.
pub fn export_manifest(records: &[PhotoRecord]) -> Vec<ExportEntry> {
    let mut sorted: Vec<&PhotoRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.milestone);

    let mut out = Vec::with_capacity(sorted.len());
    let mut index = 0usize;
    for record in sorted {
        let name = if record.milestone == 0 {
            "00-before.img".to_string()
        } else {
            index += 1;
            format!(
                "{index:02}-level-{}-{}.img",
                record.milestone / MILESTONE_UNIT,
                record.milestone
            )
        };
        out.push(ExportEntry {
            name,
            source: record.payload_file.clone(),
        });
    }
    out
}

/// Copy every payload into `dest` under the manifest names. Writes nothing
/// for an empty gallery.
pub fn export_to_dir(records: &[PhotoRecord], dest: &Path) -> Result<Vec<ExportEntry>> {
    let manifest = export_manifest(records);
    if manifest.is_empty() {
        return Ok(manifest);
    }
    fs::create_dir_all(dest).with_context(|| format!("failed to create {}", dest.display()))?;
    for entry in &manifest {
        let target = dest.join(&entry.name);
        fs::copy(&entry.source, &target).with_context(|| {
            format!(
                "failed to copy {} to {}",
                entry.source.display(),
                target.display()
            )
        })?;
    }
    Ok(manifest)
}
