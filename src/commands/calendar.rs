use crate::commands::{CommandReport, boot_session, note_migration};
use crate::quest::dates::today_id;
use crate::quest::stats::{DayClass, month_grid};
use anyhow::{Result, anyhow};

fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let (year, month) = raw
        .trim()
        .split_once('-')
        .ok_or_else(|| anyhow!("invalid month (expected YYYY-MM): {raw}"))?;
    let year: i32 = year
        .parse()
        .map_err(|_| anyhow!("invalid month (expected YYYY-MM): {raw}"))?;
    let month: u32 = month
        .parse()
        .map_err(|_| anyhow!("invalid month (expected YYYY-MM): {raw}"))?;
    if !(1..=12).contains(&month) {
        return Err(anyhow!("invalid month (expected 01-12): {raw}"));
    }
    Ok((year, month))
}

pub fn run(month: Option<&str>) -> Result<CommandReport> {
    let mut report = CommandReport::new("calendar");
    let session = boot_session()?;
    note_migration(&mut report, &session);

    let today = today_id()?;
    let (year, month) = match month {
        Some(raw) => parse_month(raw)?,
        None => today.year_month(),
    };

    for (day, class) in month_grid(session.entries(), &today, year, month) {
        let label = match class {
            DayClass::Future => "future".to_string(),
            DayClass::Start => "start".to_string(),
            DayClass::Done(count) => format!("done({count})"),
            DayClass::Missed => "missed".to_string(),
        };
        report.detail(format!("{day} {label}"));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::parse_month;

    #[test]
    fn parse_month_accepts_valid_input() {
        assert_eq!(parse_month("2024-02").expect("parse"), (2024, 2));
        assert_eq!(parse_month(" 1999-12 ").expect("parse"), (1999, 12));
    }

    #[test]
    fn parse_month_rejects_garbage() {
        assert!(parse_month("2024").is_err());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("feb-2024").is_err());
    }
}
