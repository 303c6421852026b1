use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::dates::today_id;
use crate::quest::session::ViewState;
use anyhow::Result;

pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("status");
    let session = boot_session()?;
    note_migration(&mut report, &session);

    let today = today_id()?;
    let snap = session.snapshot(&today);

    report.detail(format!("level={}", snap.level));
    report.detail(format!(
        "progress_in_level={}/1000 next_milestone={}",
        snap.progress_in_level, snap.next_milestone
    ));
    report.detail(format!("remaining_in_level={}", snap.remaining_in_level));
    report.detail(format!("today={today} today_count={}", snap.today_count));
    report.detail(format!("streak={}", snap.streak));
    report.detail(format!("daily_average={}", snap.daily_average));
    report.detail(format!("total={}", snap.total));
    report.detail(format!(
        "overall={:.1}% remaining_to_goal={}",
        snap.overall_percent, snap.remaining_to_goal
    ));

    if snap.daily_average > 0 {
        let days = snap.remaining_in_level.div_ceil(snap.daily_average);
        report.detail(format!(
            "pace: level {} done in {days} day(s) at current average",
            snap.level
        ));
    }

    if session.view() == ViewState::BeforePrompt {
        report.detail(
            "before photo: capture your Day 0 baseline with `pushup-quest capture --before <image>`"
                .to_string(),
        );
    }

    Ok(report)
}
