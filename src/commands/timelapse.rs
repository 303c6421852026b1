use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::timelapse::Timelapse;
use anyhow::Result;
use std::thread;
use std::time::Duration;

pub fn run(interval_ms: Option<u64>, max_frames: Option<usize>) -> Result<CommandReport> {
    let mut report = CommandReport::new("timelapse");
    let session = boot_session()?;
    note_migration(&mut report, &session);

    let interval = interval_ms.unwrap_or(session.config().timelapse.interval_ms);
    let records = session.photos().get_all()?;
    let mut lapse = Timelapse::new(records);

    if lapse.frame_count() == 0 {
        report.detail("no progress photos to play".to_string());
        return Ok(report);
    }

    let total_frames = lapse.frame_count();
    let mut shown = 0usize;
    while let Some(frame) = lapse.advance() {
        shown += 1;
        report.detail(format!(
            "frame {shown}/{total_frames} milestone={} captured={}",
            frame.milestone, frame.date
        ));
        if let Some(max) = max_frames {
            if shown >= max {
                break;
            }
        }
        if !lapse.is_done() {
            thread::sleep(Duration::from_millis(interval));
        }
    }
    // Reaching a bound is an explicit stop; the cursor is torn down either
    // way and never ticks again.
    lapse.cancel();

    report.detail(format!("played {shown}/{total_frames} frame(s)"));
    Ok(report)
}
