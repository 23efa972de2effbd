//! Player progress record
//!
//! One record per user. Only the progression engine writes it. Fields that
//! record history (completed missions, achievements, best scores) only grow;
//! fields that record preference (mode, theme, codename) are overwritable.

use super::{GameMode, MissionId, Theme};
use crate::game::achievements::Achievement;
use crate::game::levels::calculate_level;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Durable per-user progress snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProgress {
    // Always `level == calculate_level(xp)`; only `set_xp` writes these
    xp: u64,
    level: u32,

    /// Mission ids ever passed, in completion order
    pub completed_missions: Vec<MissionId>,

    /// Unlocked achievements, in unlock order
    #[serde(deserialize_with = "known_achievements")]
    pub achievements: Vec<Achievement>,

    /// Best-ever score per mission
    pub mission_scores: BTreeMap<MissionId, u8>,

    /// Submissions per mission, pass or fail
    pub mission_attempts: BTreeMap<MissionId, u32>,

    /// Last recorded elapsed time per mission, milliseconds
    pub mission_timings: BTreeMap<MissionId, u64>,

    pub total_play_time: u64,
    pub mode: GameMode,
    pub codename: Option<String>,
    pub intro_completed: bool,
    pub theme: Theme,

    // Glossary quizzes
    pub completed_quizzes: Vec<String>,
    pub quiz_scores: BTreeMap<String, u8>,

    // Daily cases
    pub daily_streak: u32,
    pub last_daily_date: Option<NaiveDate>,
    pub completed_dailies: Vec<String>,

    /// Opt-in for instructor (LLM) grading
    pub ai_instructor: bool,
}

/// Ids this build does not know are dropped, not fatal
fn known_achievements<'de, D>(deserializer: D) -> Result<Vec<Achievement>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Vec::<String>::deserialize(deserializer)?;
    let mut achievements = Vec::with_capacity(ids.len());
    for id in ids {
        match Achievement::from_id(&id) {
            Some(achievement) if !achievements.contains(&achievement) => achievements.push(achievement),
            Some(_) => {}
            None => warn!(achievement = %id, "skipping unknown achievement"),
        }
    }
    Ok(achievements)
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            completed_missions: Vec::new(),
            achievements: Vec::new(),
            mission_scores: BTreeMap::new(),
            mission_attempts: BTreeMap::new(),
            mission_timings: BTreeMap::new(),
            total_play_time: 0,
            mode: GameMode::Beginner,
            codename: None,
            intro_completed: false,
            theme: Theme::Cyan,
            completed_quizzes: Vec::new(),
            quiz_scores: BTreeMap::new(),
            daily_streak: 0,
            last_daily_date: None,
            completed_dailies: Vec::new(),
            ai_instructor: false,
        }
    }
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Set total XP; the level follows
    pub fn set_xp(&mut self, xp: u64) {
        self.xp = xp;
        self.level = calculate_level(xp);
    }

    pub fn add_xp(&mut self, amount: u64) {
        self.set_xp(self.xp.saturating_add(amount));
    }

    /// Re-derive the level from XP (records loaded from older storage)
    pub fn normalized(mut self) -> Self {
        self.level = calculate_level(self.xp);
        self
    }

    pub fn has_completed(&self, mission: MissionId) -> bool {
        self.completed_missions.contains(&mission)
    }

    /// Record a pass; returns true if this was the first one
    pub fn mark_completed(&mut self, mission: MissionId) -> bool {
        if self.has_completed(mission) {
            false
        } else {
            self.completed_missions.push(mission);
            true
        }
    }

    pub fn best_score(&self, mission: MissionId) -> Option<u8> {
        self.mission_scores.get(&mission).copied()
    }

    /// Keep the higher of the stored and the new score
    pub fn record_score(&mut self, mission: MissionId, score: u8) {
        let entry = self.mission_scores.entry(mission).or_insert(0);
        *entry = (*entry).max(score);
    }

    pub fn attempts(&self, mission: MissionId) -> u32 {
        self.mission_attempts.get(&mission).copied().unwrap_or(0)
    }

    pub fn record_attempt(&mut self, mission: MissionId) {
        *self.mission_attempts.entry(mission).or_insert(0) += 1;
    }

    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    /// Unlock an achievement; returns false if already held
    pub fn unlock_achievement(&mut self, achievement: Achievement) -> bool {
        if self.has_achievement(achievement) {
            false
        } else {
            self.achievements.push(achievement);
            true
        }
    }

    /// Number of missions with a perfect score
    pub fn perfect_scores(&self) -> usize {
        self.mission_scores.values().filter(|&&s| s == 100).count()
    }

    /// Mean best score over completed missions, rounded
    pub fn accuracy(&self) -> u32 {
        if self.completed_missions.is_empty() {
            return 0;
        }
        let total: u64 = self.mission_scores.values().map(|&s| s as u64).sum();
        (total as f64 / self.completed_missions.len() as f64).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_player() {
        let progress = PlayerProgress::new();
        assert_eq!(progress.xp(), 0);
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.mode, GameMode::Beginner);
        assert_eq!(progress.theme, Theme::Cyan);
        assert!(progress.completed_missions.is_empty());
        assert!(!progress.ai_instructor);
    }

    #[test]
    fn level_follows_xp() {
        let mut progress = PlayerProgress::new();
        progress.set_xp(400);
        assert_eq!(progress.level(), 3);
        progress.add_xp(500);
        assert_eq!(progress.xp(), 900);
        assert_eq!(progress.level(), 4);
    }

    #[test]
    fn best_score_never_decreases() {
        let mut progress = PlayerProgress::new();
        progress.record_score(3, 80);
        progress.record_score(3, 60);
        assert_eq!(progress.best_score(3), Some(80));
        progress.record_score(3, 95);
        assert_eq!(progress.best_score(3), Some(95));
    }

    #[test]
    fn completion_and_unlocks_are_sets() {
        let mut progress = PlayerProgress::new();
        assert!(progress.mark_completed(1));
        assert!(!progress.mark_completed(1));
        assert_eq!(progress.completed_missions, vec![1]);

        assert!(progress.unlock_achievement(Achievement::FirstMission));
        assert!(!progress.unlock_achievement(Achievement::FirstMission));
        assert_eq!(progress.achievements.len(), 1);
    }

    #[test]
    fn accuracy_averages_over_completed() {
        let mut progress = PlayerProgress::new();
        assert_eq!(progress.accuracy(), 0);
        progress.mark_completed(1);
        progress.mark_completed(2);
        progress.record_score(1, 80);
        progress.record_score(2, 95);
        assert_eq!(progress.accuracy(), 88);
    }

    #[test]
    fn json_uses_camel_case_and_fills_defaults() {
        let progress: PlayerProgress =
            serde_json::from_str(r#"{"xp": 250, "level": 9, "completedMissions": [1, 2]}"#).unwrap();
        assert_eq!(progress.completed_missions, vec![1, 2]);
        assert_eq!(progress.mode, GameMode::Beginner);
        // stored level disagrees with xp until normalized
        assert_eq!(progress.normalized().level(), 2);

        let json = serde_json::to_value(PlayerProgress::new()).unwrap();
        assert!(json.get("missionScores").is_some());
        assert!(json.get("aiInstructor").is_some());
    }

    #[test]
    fn unknown_achievement_ids_are_dropped() {
        let progress: PlayerProgress = serde_json::from_str(
            r#"{"xp": 150, "achievements": ["first_mission", "night_owl", "first_mission", "level_5"]}"#,
        )
        .unwrap();
        assert_eq!(
            progress.achievements,
            vec![Achievement::FirstMission, Achievement::Level5]
        );
        assert_eq!(progress.xp(), 150);
    }
}
