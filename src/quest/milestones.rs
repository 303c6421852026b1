/// One level spans this many push-ups; every multiple of it is a milestone.
pub const MILESTONE_UNIT: u64 = 1_000;

/// The milestone most recently reached (0 while still inside level 1).
pub fn milestone_floor(total: u64) -> u64 {
    total / MILESTONE_UNIT * MILESTONE_UNIT
}

/// The next milestone strictly ahead of the next unit of progress. Uses
/// `total + 1` so that landing exactly on a multiple counts as reached
/// rather than as the target.
pub fn milestone_ceil(total: u64) -> u64 {
    (total + 1).div_ceil(MILESTONE_UNIT) * MILESTONE_UNIT
}

/// 1-based index of the level the user is currently progressing through.
pub fn level(total: u64) -> u64 {
    total / MILESTONE_UNIT + 1
}

/// Milestone crossing caused by a single mutation, if any. A mutation that
/// jumps several multiples at once reports only the newest floor reached.
pub fn crossed_milestone(old_total: u64, new_total: u64) -> Option<u64> {
    let new_floor = milestone_floor(new_total);
    if new_floor > milestone_floor(old_total) && new_floor > 0 {
        Some(new_floor)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_is_monotonic() {
        let mut prev = 0;
        for total in 0..3_500 {
            let floor = milestone_floor(total);
            assert!(floor >= prev);
            prev = floor;
        }
    }

    #[test]
    fn ceil_treats_exact_multiples_as_reached() {
        assert_eq!(milestone_ceil(0), 1_000);
        assert_eq!(milestone_ceil(999), 1_000);
        assert_eq!(milestone_ceil(1_000), 2_000);
        assert_eq!(milestone_ceil(1_001), 2_000);
    }

    #[test]
    fn level_is_one_based() {
        assert_eq!(level(0), 1);
        assert_eq!(level(999), 1);
        assert_eq!(level(1_000), 2);
        assert_eq!(level(99_999), 100);
    }

    #[test]
    fn crossing_fires_on_exact_landing() {
        assert_eq!(crossed_milestone(900, 1_000), Some(1_000));
    }

    #[test]
    fn no_crossing_within_a_level() {
        assert_eq!(crossed_milestone(1_000, 1_900), None);
        assert_eq!(crossed_milestone(0, 999), None);
    }

    #[test]
    fn jump_reports_only_the_newest_floor() {
        assert_eq!(crossed_milestone(950, 2_300), Some(2_000));
    }

    #[test]
    fn decrement_never_crosses() {
        assert_eq!(crossed_milestone(2_300, 950), None);
    }
}
