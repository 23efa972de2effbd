//! Progression engine
//!
//! Every operation follows the same shape: validate, load one snapshot,
//! run a pure transition, save once. Validation and eligibility failures
//! return before anything is written.

pub mod achievements;
pub mod daily;
pub mod grading;
pub mod levels;
pub mod progression;

use crate::data::*;
use crate::store::ProgressStore;
use crate::GameError;
use achievements::{Achievement, AchievementSummary};
use chrono::NaiveDate;
use daily::DailyCase;
use grading::{GradingMethod, ReportGrader};
use levels::LevelProgress;
use progression::{MissionAttempt, RewardTransition};
use serde::Serialize;
use tracing::{debug, error, info};

/// Codename shown for players who never picked one
pub const DEFAULT_CODENAME: &str = "Agent";

/// Client-facing result of a mission submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionOutcome {
    pub success: bool,
    pub score: u8,
    pub xp_earned: u64,
    pub level_up: bool,
    pub new_level: u32,
    pub new_achievements: Vec<AchievementSummary>,
    pub is_repeat: bool,
    pub graded_by: GradingMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Result of an XP-granting side activity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardOutcome {
    pub xp_earned: u64,
    pub level_up: bool,
    pub new_level: u32,
    pub new_achievements: Vec<AchievementSummary>,
}

impl From<&RewardTransition> for RewardOutcome {
    fn from(t: &RewardTransition) -> Self {
        Self {
            xp_earned: t.xp_earned,
            level_up: t.level_up,
            new_level: t.new_level,
            new_achievements: summaries(&t.new_achievements),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOutcome {
    #[serde(flatten)]
    pub reward: RewardOutcome,
    pub streak: u32,
    pub streak_bonus: u64,
    pub already_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: UserId,
    pub codename: String,
    pub level: u32,
    pub xp: u64,
    pub missions_completed: usize,
    pub accuracy: u32,
}

fn summaries(achievements: &[Achievement]) -> Vec<AchievementSummary> {
    achievements.iter().map(Achievement::summary).collect()
}

/// Orchestrates grading, progression, and persistence
pub struct ProgressionEngine<S: ProgressStore> {
    catalog: Catalog,
    grader: ReportGrader,
    store: S,
}

impl<S: ProgressStore> ProgressionEngine<S> {
    pub fn new(catalog: Catalog, grader: ReportGrader, store: S) -> Self {
        Self { catalog, grader, store }
    }

    /// Built-in campaign with heuristic grading only
    pub fn with_store(store: S) -> Self {
        Self::new(Catalog::campaign(), ReportGrader::heuristic_only(), store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self, user_id: UserId) -> Result<PlayerProgress, GameError> {
        self.store
            .load(user_id)?
            .ok_or(GameError::ProgressNotFound(user_id))
    }

    fn persist(&self, user_id: UserId, progress: &PlayerProgress) -> Result<(), GameError> {
        self.store.save(user_id, progress).map_err(|err| {
            error!(user = user_id, error = %format!("{:#}", err), "failed to save progress");
            GameError::Storage(err)
        })
    }

    fn update<F>(&self, user_id: UserId, change: F) -> Result<PlayerProgress, GameError>
    where
        F: FnOnce(&PlayerProgress) -> Result<PlayerProgress, GameError>,
    {
        let progress = change(&self.load(user_id)?)?;
        self.persist(user_id, &progress)?;
        Ok(progress)
    }

    /// Provision a record; an existing one is returned untouched
    pub fn register(&self, user_id: UserId) -> Result<PlayerProgress, GameError> {
        if let Some(existing) = self.store.load(user_id)? {
            return Ok(existing);
        }
        let progress = PlayerProgress::new();
        if self.store.create(user_id, &progress)? {
            info!(user = user_id, "registered player");
            Ok(progress)
        } else {
            // lost a race with another registration
            self.load(user_id)
        }
    }

    pub fn progress(&self, user_id: UserId) -> Result<PlayerProgress, GameError> {
        self.load(user_id)
    }

    pub fn level_progress(&self, user_id: UserId) -> Result<LevelProgress, GameError> {
        Ok(LevelProgress::from_xp(self.load(user_id)?.xp()))
    }

    /// Missions the player may attempt at their current level
    pub fn missions_for(&self, user_id: UserId) -> Result<Vec<&Mission>, GameError> {
        let level = self.load(user_id)?.level();
        Ok(self.catalog.available_for(level).collect())
    }

    /// Grade a report and fold the result into the player's progress
    pub fn complete_mission(&self, user_id: UserId, attempt: &MissionAttempt) -> Result<MissionOutcome, GameError> {
        attempt.validate()?;

        let old = self.load(user_id)?;
        let mission = self
            .catalog
            .get(attempt.mission_id)
            .ok_or(GameError::MissionNotFound(attempt.mission_id))?;
        if !mission.is_unlocked_at(old.level()) {
            return Err(GameError::MissionLocked {
                required: mission.min_level,
                current: old.level(),
            });
        }

        debug!(
            user = user_id,
            mission = mission.id,
            client_timestamp = attempt.timestamp,
            "grading submission"
        );
        let grade = self.grader.grade(mission, &attempt.report, old.mode, old.ai_instructor);
        let transition = progression::apply_mission(&old, mission, grade.score, attempt.time_elapsed);

        self.persist(user_id, &transition.progress)?;

        info!(
            user = user_id,
            mission = mission.id,
            score = transition.score,
            xp = transition.xp_earned,
            level = transition.new_level,
            repeat = transition.is_repeat,
            "mission completed"
        );
        for achievement in &transition.new_achievements {
            info!(user = user_id, achievement = achievement.id(), "achievement unlocked");
        }

        Ok(MissionOutcome {
            success: true,
            score: transition.score,
            xp_earned: transition.xp_earned,
            level_up: transition.level_up,
            new_level: transition.new_level,
            new_achievements: summaries(&transition.new_achievements),
            is_repeat: transition.is_repeat,
            graded_by: grade.graded_by,
            feedback: grade.feedback,
            explanation: grade.explanation,
        })
    }

    pub fn set_mode(&self, user_id: UserId, mode: GameMode) -> Result<PlayerProgress, GameError> {
        let progress = self.update(user_id, |old| Ok(progression::apply_mode(old, mode)))?;
        info!(user = user_id, %mode, "mode changed");
        Ok(progress)
    }

    pub fn set_codename(&self, user_id: UserId, codename: &str) -> Result<PlayerProgress, GameError> {
        self.update(user_id, |old| progression::apply_codename(old, codename))
    }

    pub fn set_theme(&self, user_id: UserId, theme: Theme) -> Result<PlayerProgress, GameError> {
        self.update(user_id, |old| {
            let mut progress = old.clone();
            progress.theme = theme;
            Ok(progress)
        })
    }

    /// Opt in or out of instructor grading
    pub fn set_ai_instructor(&self, user_id: UserId, enabled: bool) -> Result<PlayerProgress, GameError> {
        self.update(user_id, |old| {
            let mut progress = old.clone();
            progress.ai_instructor = enabled;
            Ok(progress)
        })
    }

    /// Wipe the record back to a fresh player
    pub fn reset(&self, user_id: UserId) -> Result<PlayerProgress, GameError> {
        let progress = self.update(user_id, |_| Ok(PlayerProgress::new()))?;
        info!(user = user_id, "progress reset");
        Ok(progress)
    }

    pub fn complete_quiz(&self, user_id: UserId, term_id: &str, score: u8) -> Result<RewardOutcome, GameError> {
        let old = self.load(user_id)?;
        let transition = progression::apply_quiz(&old, term_id, score)?;
        self.persist(user_id, &transition.progress)?;
        info!(user = user_id, term = term_id, score, xp = transition.xp_earned, "quiz completed");
        Ok(RewardOutcome::from(&transition))
    }

    pub fn daily_case(&self, user_id: UserId, today: NaiveDate) -> Result<DailyCase, GameError> {
        Ok(daily::daily_case_for(&self.load(user_id)?, today))
    }

    pub fn complete_daily(&self, user_id: UserId, daily_id: &str, today: NaiveDate) -> Result<DailyOutcome, GameError> {
        let old = self.load(user_id)?;
        let transition = daily::apply_daily(&old, daily_id, today)?;
        if !transition.already_completed {
            self.persist(user_id, &transition.reward.progress)?;
            info!(
                user = user_id,
                daily = daily_id,
                streak = transition.streak,
                xp = transition.reward.xp_earned,
                "daily case completed"
            );
        }
        Ok(DailyOutcome {
            reward: RewardOutcome::from(&transition.reward),
            streak: transition.streak,
            streak_bonus: transition.streak_bonus,
            already_completed: transition.already_completed,
        })
    }

    /// Top players by XP, then level, then user id
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, GameError> {
        let mut records = self.store.all()?;
        records.sort_by(|(a_id, a), (b_id, b)| {
            b.xp()
                .cmp(&a.xp())
                .then(b.level().cmp(&a.level()))
                .then(a_id.cmp(b_id))
        });

        Ok(records
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, (user_id, progress))| LeaderboardEntry {
                rank: i + 1,
                user_id,
                codename: progress
                    .codename
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CODENAME.to_string()),
                level: progress.level(),
                xp: progress.xp(),
                missions_completed: progress.completed_missions.len(),
                accuracy: progress.accuracy(),
            })
            .collect())
    }
}
