use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::dates::today_id;
use crate::quest::milestones::MILESTONE_UNIT;
use anyhow::Result;

pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("stats");
    let session = boot_session()?;
    note_migration(&mut report, &session);

    let today = today_id()?;
    let snap = session.snapshot(&today);
    let goal = session.config().quest.goal;

    report.detail(format!("total={} goal={goal}", snap.total));
    report.detail(format!(
        "overall={:.2}% remaining_to_goal={}",
        snap.overall_percent, snap.remaining_to_goal
    ));
    report.detail(format!(
        "level={} milestone_floor={}",
        snap.level, snap.milestone_floor
    ));
    report.detail(format!("streak={}", snap.streak));
    report.detail(format!("daily_average={}", snap.daily_average));
    report.detail(format!("weekly_average={}", snap.weekly_average));
    report.detail(format!("best_day={}", snap.best_day));
    report.detail(format!("active_days={}", snap.active_days));
    report.detail(format!("days_since_start={}", snap.days_since_start));

    match &snap.projection {
        Some(proj) => report.detail(format!(
            "projected_finish={} ({} day(s) at current pace)",
            proj.finish_day, proj.days_to_goal
        )),
        None => report.detail("projected_finish=unknown (no data yet)".to_string()),
    }

    // Completed-level roster; a star marks levels with a progress photo.
    let completed = snap.level.saturating_sub(1).min(goal / MILESTONE_UNIT);
    if completed > 0 {
        let roster: Vec<String> = (1..=completed)
            .map(|lvl| {
                if session.photos().has(lvl * MILESTONE_UNIT) {
                    format!("{lvl}*")
                } else {
                    lvl.to_string()
                }
            })
            .collect();
        report.detail(format!("levels_complete={}", roster.join(",")));
    }

    Ok(report)
}
