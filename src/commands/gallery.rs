use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::milestones::MILESTONE_UNIT;
use crate::quest::photos::PhotoRecord;
use anyhow::Result;

fn caption(record: &PhotoRecord) -> String {
    if record.milestone == 0 {
        "baseline (Day 0)".to_string()
    } else {
        format!(
            "level {} ({} push-ups)",
            record.milestone / MILESTONE_UNIT,
            record.milestone
        )
    }
}

pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("gallery");
    let session = boot_session()?;
    note_migration(&mut report, &session);

    let records = session.photos().get_all()?;
    if records.is_empty() {
        report.detail("no progress photos yet; complete a level to capture your first".to_string());
        return Ok(report);
    }

    for (idx, record) in records.iter().enumerate() {
        report.detail(format!(
            "{}/{} {} captured={} bytes={}",
            idx + 1,
            records.len(),
            caption(record),
            record.date,
            record.bytes
        ));
    }

    if records.len() >= 2 {
        let first = &records[0];
        let last = &records[records.len() - 1];
        report.detail(format!(
            "transformation: {} -> {}",
            caption(first),
            caption(last)
        ));
    }

    Ok(report)
}
