use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::export::export_to_dir;
use anyhow::Result;
use std::path::Path;

pub fn run(dest: Option<&Path>) -> Result<CommandReport> {
    let mut report = CommandReport::new("export");
    let session = boot_session()?;
    note_migration(&mut report, &session);

    let dest = dest
        .map(Path::to_path_buf)
        .unwrap_or_else(|| session.paths().exports_dir.clone());

    let records = session.photos().get_all()?;
    let manifest = export_to_dir(&records, &dest)?;
    if manifest.is_empty() {
        report.detail("no progress photos to export".to_string());
        return Ok(report);
    }

    for entry in &manifest {
        report.detail(format!("wrote {}", dest.join(&entry.name).display()));
    }
    report.detail(format!("exported {} photo(s) to {}", manifest.len(), dest.display()));

    Ok(report)
}
