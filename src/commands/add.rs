use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::dates::{DayId, today_id};
use crate::quest::milestones::MILESTONE_UNIT;
use anyhow::Result;

pub fn run(count: u64, day: Option<&str>) -> Result<CommandReport> {
    let mut report = CommandReport::new("add");
    let mut session = boot_session()?;
    note_migration(&mut report, &session);

    let day = match day {
        Some(raw) => DayId::parse(raw)?,
        None => today_id()?,
    };

    let outcome = session.apply_add(&day, count)?;
    report.detail(format!(
        "added {count} on {} (day total {})",
        outcome.day, outcome.day_total
    ));
    report.detail(format!("total={}", outcome.total));

    if let Some(milestone) = outcome.crossed {
        report.detail(format!(
            "milestone {milestone} reached — level {} complete!",
            milestone / MILESTONE_UNIT
        ));
    }
    if let Some(milestone) = outcome.capture_request {
        report.detail(format!(
            "capture request: run `pushup-quest capture --milestone {milestone} <image>` to save a progress photo"
        ));
    }

    Ok(report)
}
