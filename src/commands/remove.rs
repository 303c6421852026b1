use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::dates::{DayId, today_id};
use anyhow::Result;

pub fn run(count: u64, day: Option<&str>) -> Result<CommandReport> {
    let mut report = CommandReport::new("remove");
    let mut session = boot_session()?;
    note_migration(&mut report, &session);

    let day = match day {
        Some(raw) => DayId::parse(raw)?,
        None => today_id()?,
    };

    let outcome = session.apply_remove(&day, count)?;
    if outcome.day_total == 0 {
        report.detail(format!("removed {count} on {}; day entry cleared", outcome.day));
    } else {
        report.detail(format!(
            "removed {count} on {} (day total {})",
            outcome.day, outcome.day_total
        ));
    }
    report.detail(format!("total={}", outcome.total));

    Ok(report)
}
