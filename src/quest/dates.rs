use crate::error::QuestError;
use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::env;
use std::fmt;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// A local calendar day, formatted `YYYY-MM-DD` so that lexicographic order
/// matches chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DayId(String);

impl DayId {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DAY_FORMAT).to_string())
    }

    /// Parse and normalize an externally supplied identifier. Rejects
    /// anything that is not a real calendar date.
    pub fn parse(raw: &str) -> Result<Self, QuestError> {
        let trimmed = raw.trim();
        let date = NaiveDate::parse_from_str(trimmed, DAY_FORMAT)
            .map_err(|_| QuestError::InvalidDayId(trimmed.to_string()))?;
        Ok(Self::from_date(date))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn date(&self) -> NaiveDate {
        // Constructors guarantee the inner string is a valid date.
        NaiveDate::parse_from_str(&self.0, DAY_FORMAT).expect("DayId holds a valid calendar date")
    }

    pub fn add_days(&self, days: i64) -> Self {
        Self::from_date(self.date() + Duration::days(days))
    }

    pub fn prev(&self) -> Self {
        self.add_days(-1)
    }

    pub fn year_month(&self) -> (i32, u32) {
        let date = self.date();
        (date.year(), date.month())
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Today's calendar day in the user's wall-clock timezone.
///
/// Resolution order: `QUEST_TODAY` (an exact day id, for reproducible runs),
/// then `QUEST_TZ` (an IANA zone name), then the system local zone.
pub fn today_id() -> Result<DayId> {
    if let Ok(pinned) = env::var("QUEST_TODAY") {
        if !pinned.trim().is_empty() {
            return DayId::parse(&pinned).context("invalid QUEST_TODAY");
        }
    }
    if let Ok(zone) = env::var("QUEST_TZ") {
        let trimmed = zone.trim();
        if !trimmed.is_empty() {
            let tz: Tz = trimmed
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid QUEST_TZ timezone: {trimmed}"))?;
            return Ok(DayId::from_date(Utc::now().with_timezone(&tz).date_naive()));
        }
    }
    Ok(DayId::from_date(Local::now().date_naive()))
}

pub fn day_id(date: NaiveDate) -> DayId {
    DayId::from_date(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_ids_sort_chronologically() {
        let a = DayId::parse("2024-01-31").expect("parse");
        let b = DayId::parse("2024-02-01").expect("parse");
        let c = DayId::parse("2024-12-09").expect("parse");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn parse_rejects_non_dates() {
        assert!(DayId::parse("2024-13-01").is_err());
        assert!(DayId::parse("yesterday").is_err());
        assert!(DayId::parse("2024-02-30").is_err());
    }

    #[test]
    fn parse_trims_whitespace() {
        let id = DayId::parse(" 2024-05-06 ").expect("parse");
        assert_eq!(id.as_str(), "2024-05-06");
    }

    #[test]
    fn walking_crosses_month_and_year_boundaries() {
        let id = DayId::parse("2024-01-01").expect("parse");
        assert_eq!(id.prev().as_str(), "2023-12-31");
        assert_eq!(id.add_days(31).as_str(), "2024-02-01");
    }
}
