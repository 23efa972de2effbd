//! Daily cases
//!
//! One rotating campaign mission per calendar day, with a streak bonus for
//! consecutive days.

use super::progression::RewardTransition;
use crate::data::{MissionId, PlayerProgress};
use crate::GameError;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Flat XP for a daily case
pub const DAILY_BONUS_XP: u64 = 100;

/// Streak bonus per consecutive day, and its ceiling
pub const STREAK_STEP_XP: u64 = 10;
pub const STREAK_CAP_XP: u64 = 100;

/// Missions the daily rotation draws from (ids `1..=DAILY_ROTATION`)
const DAILY_ROTATION: u32 = 15;

const ID_PREFIX: &str = "daily-";

/// Today's case as shown to a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCase {
    pub id: String,
    pub date: NaiveDate,
    pub mission_id: MissionId,
    pub completed: bool,
    pub bonus_xp: u64,
}

pub fn daily_id(date: NaiveDate) -> String {
    format!("{}{}", ID_PREFIX, date.format("%Y-%m-%d"))
}

/// Rotation slot for a date: `(day_of_year % 15) + 1`
pub fn daily_mission_for(date: NaiveDate) -> MissionId {
    date.ordinal() % DAILY_ROTATION + 1
}

pub fn daily_case_for(progress: &PlayerProgress, date: NaiveDate) -> DailyCase {
    let id = daily_id(date);
    DailyCase {
        completed: progress.completed_dailies.contains(&id),
        mission_id: daily_mission_for(date),
        date,
        bonus_xp: DAILY_BONUS_XP,
        id,
    }
}

/// `min(streak * 10, 100)`
pub fn streak_bonus(streak: u32) -> u64 {
    (streak as u64 * STREAK_STEP_XP).min(STREAK_CAP_XP)
}

/// Result of completing a daily case
#[derive(Debug, Clone)]
pub struct DailyTransition {
    pub reward: RewardTransition,
    pub streak: u32,
    pub streak_bonus: u64,
    pub already_completed: bool,
}

/// Complete today's case
///
/// Only today's id is accepted. A repeat is not an error; it pays nothing,
/// leaves the streak alone, and evaluates no achievements.
pub fn apply_daily(old: &PlayerProgress, daily: &str, today: NaiveDate) -> Result<DailyTransition, GameError> {
    let expected = daily_id(today);
    if daily != expected {
        return Err(GameError::InvalidInput(format!(
            "'{}' is not today's daily case ({})",
            daily, expected
        )));
    }

    if old.completed_dailies.contains(&expected) {
        return Ok(DailyTransition {
            reward: RewardTransition::unchanged(old),
            streak: old.daily_streak,
            streak_bonus: 0,
            already_completed: true,
        });
    }

    let continues = old
        .last_daily_date
        .and_then(|last| last.succ_opt())
        .map_or(false, |next| next == today);
    let streak = if continues { old.daily_streak.saturating_add(1) } else { 1 };
    let bonus = streak_bonus(streak);

    let mut progress = old.clone();
    progress.daily_streak = streak;
    progress.last_daily_date = Some(today);
    progress.completed_dailies.push(expected);

    Ok(DailyTransition {
        reward: RewardTransition::grant(old, progress, DAILY_BONUS_XP + bonus),
        streak,
        streak_bonus: bonus,
        already_completed: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn id_and_rotation() {
        let date = day(2024, 1, 14);
        assert_eq!(daily_id(date), "daily-2024-01-14");
        // ordinal 14
        assert_eq!(daily_mission_for(date), 15);
        assert_eq!(daily_mission_for(day(2024, 1, 15)), 1);
    }

    #[test]
    fn case_reports_completion() {
        let mut progress = PlayerProgress::new();
        let today = day(2024, 3, 1);
        assert!(!daily_case_for(&progress, today).completed);
        progress.completed_dailies.push(daily_id(today));
        let case = daily_case_for(&progress, today);
        assert!(case.completed);
        assert_eq!(case.bonus_xp, 100);
    }

    #[test]
    fn first_daily_starts_streak() {
        let t = apply_daily(&PlayerProgress::new(), "daily-2024-03-01", day(2024, 3, 1)).unwrap();
        assert_eq!(t.streak, 1);
        assert_eq!(t.streak_bonus, 10);
        assert_eq!(t.reward.xp_earned, 110);
        assert_eq!(t.reward.new_level, 2);
        assert!(t.reward.level_up);
    }

    #[test]
    fn consecutive_days_extend_streak() {
        let first = apply_daily(&PlayerProgress::new(), "daily-2024-02-28", day(2024, 2, 28)).unwrap();
        let second = apply_daily(&first.reward.progress, "daily-2024-02-29", day(2024, 2, 29)).unwrap();
        assert_eq!(second.streak, 2);
        assert_eq!(second.reward.xp_earned, 120);
        assert_eq!(second.reward.progress.xp(), 230);
    }

    #[test]
    fn gap_resets_streak() {
        let mut progress = PlayerProgress::new();
        progress.daily_streak = 7;
        progress.last_daily_date = Some(day(2024, 3, 1));
        let t = apply_daily(&progress, "daily-2024-03-03", day(2024, 3, 3)).unwrap();
        assert_eq!(t.streak, 1);
    }

    #[test]
    fn bonus_is_capped() {
        assert_eq!(streak_bonus(10), 100);
        assert_eq!(streak_bonus(42), 100);
    }

    #[test]
    fn repeat_pays_nothing() {
        let today = day(2024, 3, 1);
        let first = apply_daily(&PlayerProgress::new(), "daily-2024-03-01", today).unwrap();
        let again = apply_daily(&first.reward.progress, "daily-2024-03-01", today).unwrap();
        assert!(again.already_completed);
        assert_eq!(again.reward.xp_earned, 0);
        assert_eq!(again.streak, 1);
        assert_eq!(again.reward.progress, first.reward.progress);
    }

    #[test]
    fn repeat_reports_no_unlocks() {
        let today = day(2024, 3, 1);
        let mut progress = apply_daily(&PlayerProgress::new(), "daily-2024-03-01", today)
            .unwrap()
            .reward
            .progress;
        // earned but not yet unlocked
        progress.mark_completed(1);
        progress.mode = crate::data::GameMode::Expert;

        for _ in 0..2 {
            let again = apply_daily(&progress, "daily-2024-03-01", today).unwrap();
            assert!(again.already_completed);
            assert!(again.reward.new_achievements.is_empty());
            assert!(!again.reward.level_up);
            assert_eq!(again.reward.progress, progress);
        }
    }

    #[test]
    fn stale_id_rejected() {
        let result = apply_daily(&PlayerProgress::new(), "daily-2024-02-29", day(2024, 3, 1));
        assert!(matches!(result, Err(GameError::InvalidInput(_))));
    }
}
