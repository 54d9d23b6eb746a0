// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure arithmetic for goal progress and daily streaks.
//!
//! Kept free of storage so the recompute rules are testable in isolation.
//! The storage adapter applies these inside its read-modify-write cycle;
//! client-supplied progress values are never trusted.

use chrono::{Days, NaiveDate};

/// Percentage of completed daily tasks, rounded to the nearest integer.
///
/// A goal with no tasks reports 0, not a division error.
pub fn progress_percentage(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (f64::from(completed) / f64::from(total) * 100.0).round();
    pct as u8
}

/// Next value of a goal's daily streak after activity on `today`.
///
/// - unchanged if the streak was already updated today
/// - +1 if the last activity was exactly yesterday
/// - reset to 1 otherwise (gap, or first ever activity)
pub fn next_streak(last_activity: Option<NaiveDate>, today: NaiveDate, current: u32) -> u32 {
    match last_activity {
        Some(last) if last == today => current,
        Some(last) if Some(last) == today.checked_sub_days(Days::new(1)) => current + 1,
        _ => 1,
    }
}

/// Streak count on a daily task after toggling its completion flag.
///
/// Completion increments; un-completion decrements, floored at 0.
pub fn toggled_task_streak(current: u32, completed: bool) -> u32 {
    if completed {
        current + 1
    } else {
        current.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn percentage_rounds() {
        assert_eq!(progress_percentage(3, 4), 75);
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(2, 3), 67);
        assert_eq!(progress_percentage(4, 4), 100);
    }

    #[test]
    fn percentage_of_empty_goal_is_zero() {
        assert_eq!(progress_percentage(0, 0), 0);
    }

    #[test]
    fn streak_increments_after_yesterday() {
        assert_eq!(next_streak(Some(d("2026-03-09")), d("2026-03-10"), 4), 5);
    }

    #[test]
    fn streak_resets_after_gap() {
        assert_eq!(next_streak(Some(d("2026-03-07")), d("2026-03-10"), 4), 1);
    }

    #[test]
    fn streak_unchanged_when_already_updated_today() {
        assert_eq!(next_streak(Some(d("2026-03-10")), d("2026-03-10"), 4), 4);
    }

    #[test]
    fn streak_starts_at_one() {
        assert_eq!(next_streak(None, d("2026-03-10"), 0), 1);
    }

    #[test]
    fn task_streak_floors_at_zero() {
        assert_eq!(toggled_task_streak(0, false), 0);
        assert_eq!(toggled_task_streak(3, false), 2);
        assert_eq!(toggled_task_streak(3, true), 4);
    }
}
