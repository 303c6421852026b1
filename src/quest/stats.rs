use crate::quest::dates::{DayId, day_id};
use crate::quest::log_store::ActivityLog;
use crate::quest::milestones::{MILESTONE_UNIT, level, milestone_ceil, milestone_floor};
use chrono::NaiveDate;
use serde::Serialize;

fn round_div(sum: u64, days: u64) -> u64 {
    if days == 0 {
        return 0;
    }
    (sum as f64 / days as f64).round() as u64
}

pub fn total(entries: &ActivityLog) -> u64 {
    entries.values().sum()
}

pub fn today_count(entries: &ActivityLog, today: &DayId) -> u64 {
    entries.get(today).copied().unwrap_or(0)
}

/// Mean over days that actually have an entry; 0 with no entries.
pub fn daily_average(entries: &ActivityLog) -> u64 {
    round_div(total(entries), entries.len() as u64)
}

pub fn best_day(entries: &ActivityLog) -> u64 {
    entries.values().copied().max().unwrap_or(0)
}

/// Calendar days from the first entry through today, inclusive (the start
/// day itself counts as day 1). 0 with no entries.
pub fn days_since_start(entries: &ActivityLog, today: &DayId) -> u64 {
    let Some(first) = entries.keys().next() else {
        return 0;
    };
    let span = (today.date() - first.date()).num_days() + 1;
    span.max(0) as u64
}

/// Consecutive positive-entry days walking backward. The walk starts at
/// today only when today already has activity, otherwise at yesterday: a
/// day that simply has not been logged yet does not break a live streak.
pub fn streak(entries: &ActivityLog, today: &DayId) -> u64 {
    let mut cursor = if today_count(entries, today) > 0 {
        today.clone()
    } else {
        today.prev()
    };
    let mut run = 0;
    while entries.get(&cursor).copied().unwrap_or(0) > 0 {
        run += 1;
        cursor = cursor.prev();
    }
    run
}

/// Mean over the 7 calendar days ending today inclusive, counting only days
/// with entries. Days without entries are excluded from the denominator
/// rather than treated as zero.
pub fn weekly_average(entries: &ActivityLog, today: &DayId) -> u64 {
    let mut sum = 0;
    let mut days = 0;
    for back in 0..7 {
        if let Some(count) = entries.get(&today.add_days(-back)) {
            sum += count;
            days += 1;
        }
    }
    round_div(sum, days)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub days_to_goal: u64,
    pub finish_day: DayId,
}

/// Undefined while there is no data to project from.
pub fn projection(entries: &ActivityLog, goal: u64, today: &DayId) -> Option<Projection> {
    let average = daily_average(entries);
    if average == 0 {
        return None;
    }
    let remaining = goal.saturating_sub(total(entries));
    let days_to_goal = remaining.div_ceil(average);
    Some(Projection {
        days_to_goal,
        finish_day: today.add_days(days_to_goal as i64),
    })
}

/// Read-only view of all derived state; recomputed on demand, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub total: u64,
    pub today_count: u64,
    pub streak: u64,
    pub daily_average: u64,
    pub weekly_average: u64,
    pub best_day: u64,
    pub active_days: u64,
    pub days_since_start: u64,
    pub level: u64,
    pub milestone_floor: u64,
    pub next_milestone: u64,
    pub progress_in_level: u64,
    pub remaining_in_level: u64,
    pub remaining_to_goal: u64,
    pub overall_percent: f64,
    pub projection: Option<Projection>,
}

pub fn snapshot(entries: &ActivityLog, today: &DayId, goal: u64) -> Snapshot {
    let total = total(entries);
    let floor = milestone_floor(total);
    let next = milestone_ceil(total);
    Snapshot {
        total,
        today_count: today_count(entries, today),
        streak: streak(entries, today),
        daily_average: daily_average(entries),
        weekly_average: weekly_average(entries, today),
        best_day: best_day(entries),
        active_days: entries.len() as u64,
        days_since_start: days_since_start(entries, today),
        level: level(total),
        milestone_floor: floor,
        next_milestone: next,
        progress_in_level: total - floor,
        remaining_in_level: next - total,
        remaining_to_goal: goal.saturating_sub(total),
        overall_percent: if goal > 0 {
            total as f64 / goal as f64 * 100.0
        } else {
            0.0
        },
        projection: projection(entries, goal, today),
    }
}

/// Summary of the 1,000-push-up span ending at a just-reached milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelBreakdown {
    pub milestone: u64,
    pub start_day: DayId,
    pub end_day: DayId,
    pub days_elapsed: u64,
    pub pushups_in_span: u64,
    pub best_day_in_span: u64,
    pub active_days_in_span: u64,
    pub average_per_day: u64,
}

/// None when the milestone is 0, unaligned, or not yet reached.
pub fn level_breakdown(entries: &ActivityLog, milestone: u64) -> Option<LevelBreakdown> {
    if milestone == 0 || milestone % MILESTONE_UNIT != 0 {
        return None;
    }
    let base = milestone - MILESTONE_UNIT;

    let mut running = 0;
    let mut start_day = None;
    let mut end_day = None;
    for (day, count) in entries {
        running += count;
        if start_day.is_none() && running > base {
            start_day = Some(day.clone());
        }
        if running >= milestone {
            end_day = Some(day.clone());
            break;
        }
    }
    let start_day = start_day?;
    let end_day = end_day?;

    let mut pushups_in_span = 0;
    let mut best_day_in_span = 0;
    let mut active_days_in_span = 0;
    for (_, count) in entries.range(start_day.clone()..=end_day.clone()) {
        pushups_in_span += count;
        best_day_in_span = best_day_in_span.max(*count);
        active_days_in_span += 1;
    }

    let days_elapsed = ((end_day.date() - start_day.date()).num_days() + 1).max(1) as u64;
    Some(LevelBreakdown {
        milestone,
        start_day,
        end_day,
        days_elapsed,
        pushups_in_span,
        best_day_in_span,
        active_days_in_span,
        average_per_day: round_div(pushups_in_span, days_elapsed),
    })
}

/// Classification of a single calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    /// After today.
    Future,
    /// Before tracking began (prior to the first-ever entry).
    Start,
    Done(u64),
    /// Within the tracked window, today or earlier, with nothing logged.
    Missed,
}

pub fn classify_day(entries: &ActivityLog, today: &DayId, day: &DayId) -> DayClass {
    if day > today {
        return DayClass::Future;
    }
    match entries.keys().next() {
        None => DayClass::Start,
        Some(first) if day < first => DayClass::Start,
        _ => match entries.get(day) {
            Some(&count) if count > 0 => DayClass::Done(count),
            _ => DayClass::Missed,
        },
    }
}

/// Every day of the given month, classified for calendar rendering.
pub fn month_grid(
    entries: &ActivityLog,
    today: &DayId,
    year: i32,
    month: u32,
) -> Vec<(DayId, DayClass)> {
    let mut out = Vec::new();
    for dom in 1..=31 {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, dom) else {
            break;
        };
        let day = day_id(date);
        let class = classify_day(entries, today, &day);
        out.push((day, class));
    }
    out
}
