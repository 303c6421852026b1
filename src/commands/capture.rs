use crate::commands::{CommandReport, boot_session, note_migration};
use crate::error::{QuestError, QuestWarnCode};
use crate::quest::milestones::{MILESTONE_UNIT, milestone_floor};
use crate::quest::stats::total;
use crate::quest::warn;
use anyhow::{Context, Result, anyhow};
use chrono::Local;
use std::fs;
use std::path::Path;

pub fn run(milestone: Option<u64>, before: bool, image: &Path) -> Result<CommandReport> {
    let mut report = CommandReport::new("capture");
    let mut session = boot_session()?;
    note_migration(&mut report, &session);

    let milestone = if before {
        0
    } else {
        let m = milestone.ok_or_else(|| anyhow!("pass --milestone N or --before"))?;
        if m == 0 || m % MILESTONE_UNIT != 0 {
            return Err(QuestError::InvalidMilestone(m).into());
        }
        m
    };

    let reached = milestone_floor(total(session.entries()));
    if milestone > reached {
        report.issue(format!(
            "milestone {milestone} not reached yet (current floor {reached}); nothing stored"
        ));
        return Ok(report);
    }

    let payload = fs::read(image)
        .with_context(|| format!("failed to read image payload {}", image.display()))?;
    let captured_at = Local::now().to_rfc3339();

    let retake = session.photos().has(milestone);
    match session.photos().put(milestone, &payload, &captured_at) {
        Ok(record) => {
            session.capture_saved();
            let what = if milestone == 0 {
                "baseline".to_string()
            } else {
                format!("milestone {milestone}")
            };
            if retake {
                report.detail(format!("retook {what} photo ({} bytes)", record.bytes));
            } else {
                report.detail(format!("stored {what} photo ({} bytes)", record.bytes));
            }
            report.detail(format!("sha256={}", record.sha256));
        }
        Err(err) => {
            // Photo storage trouble never affects activity logging; the
            // prompt stays open for a retry or dismissal.
            warn::emit(
                QuestWarnCode::W002PhotoStoreDown,
                "capture",
                &milestone.to_string(),
                "photo store write failed",
                &err.to_string(),
            );
            report.issue(format!("capture failed, retry or dismiss: {err}"));
        }
    }

    Ok(report)
}
