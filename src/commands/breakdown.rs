use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::milestones::MILESTONE_UNIT;
use crate::quest::stats::level_breakdown;
use anyhow::Result;

pub fn run(milestone: u64) -> Result<CommandReport> {
    let mut report = CommandReport::new("breakdown");
    let session = boot_session()?;
    note_migration(&mut report, &session);

    match level_breakdown(session.entries(), milestone) {
        Some(span) => {
            report.detail(format!(
                "milestone={} level={}",
                span.milestone,
                span.milestone / MILESTONE_UNIT
            ));
            report.detail(format!("span={}..{}", span.start_day, span.end_day));
            report.detail(format!("days_elapsed={}", span.days_elapsed));
            report.detail(format!("pushups_in_span={}", span.pushups_in_span));
            report.detail(format!("best_day_in_span={}", span.best_day_in_span));
            report.detail(format!("active_days_in_span={}", span.active_days_in_span));
            report.detail(format!("average_per_day={}", span.average_per_day));
        }
        None => {
            report.issue(format!(
                "milestone {milestone} has not been reached (or is not a positive multiple of {MILESTONE_UNIT})"
            ));
        }
    }

    Ok(report)
}
