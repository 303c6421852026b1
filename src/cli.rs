use crate::commands;
use crate::commands::CommandReport;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pushup-quest",
    version,
    about = "Track daily push-ups toward a 100k goal: streaks, milestones, progress photos."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Record push-ups for a day (default: today).
    Add {
        count: u64,
        #[arg(long, value_name = "YYYY-MM-DD")]
        day: Option<String>,
    },
    /// Undo push-ups for a day; a day that reaches zero is deleted.
    Remove {
        count: u64,
        #[arg(long, value_name = "YYYY-MM-DD")]
        day: Option<String>,
    },
    /// Current level, progress, streak, and today's count.
    Status,
    /// Full statistics including averages, best day, and projected finish.
    Stats,
    /// Summary of the 1,000-push-up span ending at a reached milestone.
    Breakdown {
        #[arg(long)]
        milestone: u64,
    },
    /// Classify every day of a month (default: the current month).
    Calendar {
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },
    /// Store a progress photo for a milestone, or the Day 0 baseline.
    Capture {
        /// Milestone the photo belongs to (a positive multiple of 1000).
        #[arg(long, conflicts_with = "before")]
        milestone: Option<u64>,
        /// Store as the Day 0 baseline instead of a milestone.
        #[arg(long)]
        before: bool,
        /// Already-ingested image payload to store.
        image: PathBuf,
    },
    /// List stored progress photos, baseline first.
    Gallery,
    /// Step through the gallery on a fixed cadence.
    Timelapse {
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Stop after this many frames.
        #[arg(long)]
        max_frames: Option<usize>,
    },
    /// Copy every photo payload into a directory under deterministic names.
    Export {
        #[arg(long)]
        dest: Option<PathBuf>,
    },
    /// Check stores, photo integrity, and environment for problems.
    Verify,
}

fn render(report: &CommandReport) -> Result<()> {
    for detail in &report.details {
        println!("{detail}");
    }
    for issue in &report.issues {
        eprintln!("issue: {issue}");
    }
    if report.ok {
        Ok(())
    } else {
        anyhow::bail!(
            "{} finished with {} issue(s)",
            report.command,
            report.issues.len()
        )
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let report = match cli.command {
        Command::Add { count, day } => commands::add::run(count, day.as_deref())?,
        Command::Remove { count, day } => commands::remove::run(count, day.as_deref())?,
        Command::Status => commands::status::run()?,
        Command::Stats => commands::stats::run()?,
        Command::Breakdown { milestone } => commands::breakdown::run(milestone)?,
        Command::Calendar { month } => commands::calendar::run(month.as_deref())?,
        Command::Capture {
            milestone,
            before,
            image,
        } => commands::capture::run(milestone, before, &image)?,
        Command::Gallery => commands::gallery::run()?,
        Command::Timelapse {
            interval_ms,
            max_frames,
        } => commands::timelapse::run(interval_ms, max_frames)?,
        Command::Export { dest } => commands::export::run(dest.as_deref())?,
        Command::Verify => commands::verify::run()?,
    };

    render(&report)
}
