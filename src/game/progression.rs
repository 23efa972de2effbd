//! Snapshot transitions
//!
//! Every function here takes the prior progress snapshot by reference and
//! returns the next one by value. Nothing touches storage; the engine loads,
//! calls one transition, and saves the result.

use super::achievements::{unlock_new_achievements, Achievement};
use super::levels::calculate_mission_xp;
use crate::data::{GameMode, Mission, MissionId, PlayerProgress};
use crate::GameError;
use serde::{Deserialize, Serialize};

/// Accepted report length, in characters
pub const REPORT_MIN_CHARS: usize = 10;
pub const REPORT_MAX_CHARS: usize = 5000;

/// Repeat completions earn `1 / REPEAT_XP_DIVISOR` of the mission XP
pub const REPEAT_XP_DIVISOR: u64 = 4;

/// XP for a first-time quiz pass
pub const QUIZ_XP: u64 = 50;

/// Lowest quiz score that counts as a pass
pub const QUIZ_PASS_SCORE: u8 = 66;

pub const CODENAME_MIN_CHARS: usize = 3;
pub const CODENAME_MAX_CHARS: usize = 20;

/// One report submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionAttempt {
    pub mission_id: MissionId,
    pub report: String,
    /// Milliseconds spent on the mission
    pub time_elapsed: u64,
    /// Client clock, epoch milliseconds; logged, never trusted
    pub timestamp: i64,
}

impl MissionAttempt {
    pub fn new(mission_id: MissionId, report: &str, time_elapsed: u64) -> Self {
        Self {
            mission_id,
            report: report.to_string(),
            time_elapsed,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let length = self.report.chars().count();
        if length < REPORT_MIN_CHARS {
            return Err(GameError::InvalidInput(format!(
                "report must be at least {} characters",
                REPORT_MIN_CHARS
            )));
        }
        if length > REPORT_MAX_CHARS {
            return Err(GameError::InvalidInput(format!(
                "report must be at most {} characters",
                REPORT_MAX_CHARS
            )));
        }
        Ok(())
    }
}

/// Result of a mission transition, with the snapshot to persist
#[derive(Debug, Clone)]
pub struct MissionTransition {
    pub progress: PlayerProgress,
    pub score: u8,
    pub xp_earned: u64,
    pub level_up: bool,
    pub new_level: u32,
    pub new_achievements: Vec<Achievement>,
    pub is_repeat: bool,
}

/// Fold a graded attempt into the snapshot
///
/// Eligibility is the caller's concern; this only merges.
pub fn apply_mission(old: &PlayerProgress, mission: &Mission, score: u8, time_elapsed: u64) -> MissionTransition {
    let score = score.min(100);
    let is_first = !old.has_completed(mission.id);

    let base_xp = calculate_mission_xp(mission.xp_reward, old.mode, score as i64);
    let xp_earned = if is_first { base_xp } else { base_xp / REPEAT_XP_DIVISOR };

    let mut progress = old.clone();
    progress.add_xp(xp_earned);
    progress.mark_completed(mission.id);
    progress.record_score(mission.id, score);
    progress.record_attempt(mission.id);
    progress.mission_timings.insert(mission.id, time_elapsed);
    progress.total_play_time = progress.total_play_time.saturating_add(time_elapsed);

    let new_achievements = unlock_new_achievements(old, &mut progress);

    MissionTransition {
        score,
        xp_earned,
        level_up: progress.level() > old.level(),
        new_level: progress.level(),
        new_achievements,
        is_repeat: !is_first,
        progress,
    }
}

/// XP-granting side activity outcome (quizzes)
#[derive(Debug, Clone)]
pub struct RewardTransition {
    pub progress: PlayerProgress,
    pub xp_earned: u64,
    pub level_up: bool,
    pub new_level: u32,
    pub new_achievements: Vec<Achievement>,
}

impl RewardTransition {
    /// No reward and no state change
    pub(crate) fn unchanged(old: &PlayerProgress) -> Self {
        Self {
            progress: old.clone(),
            xp_earned: 0,
            level_up: false,
            new_level: old.level(),
            new_achievements: Vec::new(),
        }
    }

    pub(crate) fn grant(old: &PlayerProgress, mut progress: PlayerProgress, xp_earned: u64) -> Self {
        progress.add_xp(xp_earned);
        let new_achievements = unlock_new_achievements(old, &mut progress);
        Self {
            xp_earned,
            level_up: progress.level() > old.level(),
            new_level: progress.level(),
            new_achievements,
            progress,
        }
    }
}

/// Record a glossary quiz result
pub fn apply_quiz(old: &PlayerProgress, term_id: &str, score: u8) -> Result<RewardTransition, GameError> {
    let term_id = term_id.trim();
    if term_id.is_empty() {
        return Err(GameError::InvalidInput("term id must not be empty".to_string()));
    }
    let score = score.min(100);

    let first_time = !old.completed_quizzes.iter().any(|t| t == term_id);
    let xp_earned = if first_time && score >= QUIZ_PASS_SCORE { QUIZ_XP } else { 0 };

    let mut progress = old.clone();
    if first_time {
        progress.completed_quizzes.push(term_id.to_string());
    }
    let best = progress.quiz_scores.entry(term_id.to_string()).or_insert(0);
    *best = (*best).max(score);

    Ok(RewardTransition::grant(old, progress, xp_earned))
}

pub fn apply_mode(old: &PlayerProgress, mode: GameMode) -> PlayerProgress {
    let mut progress = old.clone();
    progress.mode = mode;
    progress
}

/// Set the codename and mark the intro as done
pub fn apply_codename(old: &PlayerProgress, codename: &str) -> Result<PlayerProgress, GameError> {
    let codename = codename.trim();
    let length = codename.chars().count();
    if !(CODENAME_MIN_CHARS..=CODENAME_MAX_CHARS).contains(&length) {
        return Err(GameError::InvalidInput(format!(
            "codename must be {} to {} characters",
            CODENAME_MIN_CHARS, CODENAME_MAX_CHARS
        )));
    }
    let mut progress = old.clone();
    progress.codename = Some(codename.to_string());
    progress.intro_completed = true;
    Ok(progress)
}
