use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::photos::payload_digest;
use crate::quest::stats::total;
use anyhow::Result;
use std::env;

include!(concat!(env!("OUT_DIR"), "/quest_env_allowlist.rs"));

pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("verify");
    let session = boot_session()?;
    note_migration(&mut report, &session);

    report.detail(format!("build={}", env!("BUILD_UUID")));
    report.detail(format!(
        "quest_home={}",
        session.paths().quest_home.display()
    ));
    report.detail(format!("log_file={}", session.paths().log_file.display()));
    report.detail(format!(
        "entries={} total={}",
        session.entries().len(),
        total(session.entries())
    ));
    report.detail(format!("goal={}", session.config().quest.goal));

    match session.photos().get_all() {
        Ok(records) => {
            report.detail(format!("photos={}", records.len()));
            for record in &records {
                match session.photos().read_payload(record) {
                    Ok(payload) => {
                        if payload_digest(&payload) != record.sha256 {
                            report.issue(format!(
                                "photo payload for milestone {} does not match its recorded sha256",
                                record.milestone
                            ));
                        }
                    }
                    Err(err) => {
                        report.issue(format!(
                            "photo payload for milestone {} unreadable: {err:#}",
                            record.milestone
                        ));
                    }
                }
            }
        }
        Err(err) => report.issue(format!("photo store unavailable: {err}")),
    }

    for (key, _) in env::vars() {
        if key.starts_with("QUEST_") && !GENERATED_QUEST_ENV_ALLOWLIST.contains(&key.as_str()) {
            report.issue(format!("unrecognized environment variable {key}"));
        }
    }

    Ok(report)
}
