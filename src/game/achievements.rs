//! Achievement rule set
//!
//! Each achievement pairs an id with a pure predicate over a progress
//! snapshot. Catalog order is the evaluation and reporting order.

use crate::data::{GameMode, MissionId, PlayerProgress};
use serde::{Deserialize, Serialize};

/// Completed missions needed for the completionist unlock
pub const COMPLETIONIST_THRESHOLD: usize = 10;

/// Perfect scores needed for the perfectionist unlock
pub const PERFECTIONIST_THRESHOLD: usize = 3;

/// Elapsed-time ceiling for the speed runner unlock
pub const SPEED_RUN_MS: u64 = 2 * 60 * 1000;

/// Missions that together earn the metadata unlock
pub const METADATA_MASTER_MISSIONS: [MissionId; 2] = [2, 9];

/// Achievement ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstMission,     // First mission passed
    MetadataMaster,   // Missions 2 and 9
    DorkLord,         // 5 missions
    WhoisWizard,      // Any perfect score
    SpeedRunner,      // Mission under two minutes
    Perfectionist,    // 3 perfect scores
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "level_10")]
    Level10,
    ExpertMode,       // Pass a mission in expert mode
    Completionist,    // 10 missions
}

impl Achievement {
    /// Catalog order
    pub const ALL: [Achievement; 10] = [
        Achievement::FirstMission,
        Achievement::MetadataMaster,
        Achievement::DorkLord,
        Achievement::WhoisWizard,
        Achievement::SpeedRunner,
        Achievement::Perfectionist,
        Achievement::Level5,
        Achievement::Level10,
        Achievement::ExpertMode,
        Achievement::Completionist,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Achievement::FirstMission => "first_mission",
            Achievement::MetadataMaster => "metadata_master",
            Achievement::DorkLord => "dork_lord",
            Achievement::WhoisWizard => "whois_wizard",
            Achievement::SpeedRunner => "speed_runner",
            Achievement::Perfectionist => "perfectionist",
            Achievement::Level5 => "level_5",
            Achievement::Level10 => "level_10",
            Achievement::ExpertMode => "expert_mode",
            Achievement::Completionist => "completionist",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstMission => "First Steps",
            Achievement::MetadataMaster => "Metadata Master",
            Achievement::DorkLord => "Dork Lord",
            Achievement::WhoisWizard => "WHOIS Wizard",
            Achievement::SpeedRunner => "Speed Runner",
            Achievement::Perfectionist => "Perfectionist",
            Achievement::Level5 => "Investigator",
            Achievement::Level10 => "Senior Analyst",
            Achievement::ExpertMode => "No Training Wheels",
            Achievement::Completionist => "Master Detective",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstMission => "Complete your first mission",
            Achievement::MetadataMaster => "Complete 3 missions using metadata analysis",
            Achievement::DorkLord => "Complete 5 missions using search dorking",
            Achievement::WhoisWizard => "Perfect score on a WHOIS investigation",
            Achievement::SpeedRunner => "Complete a mission in under 2 minutes",
            Achievement::Perfectionist => "Get 100% on 3 different missions",
            Achievement::Level5 => "Reach level 5",
            Achievement::Level10 => "Reach level 10",
            Achievement::ExpertMode => "Complete a mission in Expert mode",
            Achievement::Completionist => "Complete all missions",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Achievement::FirstMission => "target",
            Achievement::MetadataMaster => "image",
            Achievement::DorkLord => "search",
            Achievement::WhoisWizard => "globe",
            Achievement::SpeedRunner => "zap",
            Achievement::Perfectionist => "award",
            Achievement::Level5 => "shield",
            Achievement::Level10 => "star",
            Achievement::ExpertMode => "graduation-cap",
            Achievement::Completionist => "crown",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    /// The unlock predicate, evaluated against a post-mutation snapshot
    pub fn is_earned(&self, progress: &PlayerProgress) -> bool {
        let completed = &progress.completed_missions;
        match self {
            Achievement::FirstMission => !completed.is_empty(),
            Achievement::MetadataMaster => METADATA_MASTER_MISSIONS
                .iter()
                .all(|id| progress.has_completed(*id)),
            Achievement::DorkLord => completed.len() >= 5,
            Achievement::WhoisWizard => progress.perfect_scores() >= 1,
            Achievement::SpeedRunner => completed.iter().any(|id| {
                progress
                    .mission_timings
                    .get(id)
                    .map_or(false, |&ms| ms > 0 && ms < SPEED_RUN_MS)
            }),
            Achievement::Perfectionist => progress.perfect_scores() >= PERFECTIONIST_THRESHOLD,
            Achievement::Level5 => progress.level() >= 5,
            Achievement::Level10 => progress.level() >= 10,
            Achievement::ExpertMode => progress.mode == GameMode::Expert && !completed.is_empty(),
            Achievement::Completionist => completed.len() >= COMPLETIONIST_THRESHOLD,
        }
    }

    pub fn summary(&self) -> AchievementSummary {
        AchievementSummary {
            id: self.id(),
            title: self.title(),
            description: self.description(),
            icon: self.icon(),
        }
    }
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Client-facing view of an unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Achievements not held in `old` whose predicate holds for `new`
pub fn check_new_achievements(old: &PlayerProgress, new: &PlayerProgress) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| !old.has_achievement(*a) && a.is_earned(new))
        .collect()
}

/// Evaluate the rule set and append fresh unlocks to `new`
pub fn unlock_new_achievements(old: &PlayerProgress, new: &mut PlayerProgress) -> Vec<Achievement> {
    let unlocked = check_new_achievements(old, new);
    for achievement in &unlocked {
        new.unlock_achievement(*achievement);
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(ids: &[MissionId]) -> PlayerProgress {
        let mut progress = PlayerProgress::new();
        for &id in ids {
            progress.mark_completed(id);
        }
        progress
    }

    #[test]
    fn ids_round_trip_through_serde() {
        for achievement in Achievement::ALL {
            let json = serde_json::to_string(&achievement).unwrap();
            assert_eq!(json, format!("\"{}\"", achievement.id()));
            assert_eq!(Achievement::from_id(achievement.id()), Some(achievement));
        }
    }

    #[test]
    fn first_mission_unlocks_once() {
        let old = PlayerProgress::new();
        let mut new = completed(&[1]);
        let unlocked = unlock_new_achievements(&old, &mut new);
        assert_eq!(unlocked, vec![Achievement::FirstMission]);

        // second evaluation against the updated snapshot finds nothing new
        assert!(check_new_achievements(&new, &new).is_empty());
    }

    #[test]
    fn same_snapshot_yields_nothing() {
        let mut progress = completed(&[1, 2, 3, 4, 5]);
        progress.set_xp(5_000);
        unlock_new_achievements(&PlayerProgress::new(), &mut progress);
        assert!(check_new_achievements(&progress, &progress).is_empty());
    }

    #[test]
    fn perfectionist_needs_three_exact_hundreds() {
        let mut progress = completed(&[3, 4, 6]);
        progress.record_score(3, 100);
        progress.record_score(4, 100);
        progress.record_score(6, 99);
        assert!(!Achievement::Perfectionist.is_earned(&progress));
        progress.record_score(6, 100);
        assert!(Achievement::Perfectionist.is_earned(&progress));
    }

    #[test]
    fn level_thresholds() {
        let mut progress = PlayerProgress::new();
        progress.set_xp(1_599);
        assert!(!Achievement::Level5.is_earned(&progress));
        progress.set_xp(1_600);
        assert!(Achievement::Level5.is_earned(&progress));
        assert!(!Achievement::Level10.is_earned(&progress));
        progress.set_xp(8_100);
        assert!(Achievement::Level10.is_earned(&progress));
    }

    #[test]
    fn completionist_threshold() {
        let nine = completed(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(!Achievement::Completionist.is_earned(&nine));
        let ten = completed(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert!(Achievement::Completionist.is_earned(&ten));
    }

    #[test]
    fn expert_mode_needs_a_completion() {
        let mut progress = PlayerProgress::new();
        progress.mode = GameMode::Expert;
        assert!(!Achievement::ExpertMode.is_earned(&progress));
        progress.mark_completed(1);
        assert!(Achievement::ExpertMode.is_earned(&progress));
    }

    #[test]
    fn speed_runner_ignores_missing_timings() {
        let mut progress = completed(&[1]);
        progress.mission_timings.insert(1, 0);
        assert!(!Achievement::SpeedRunner.is_earned(&progress));
        progress.mission_timings.insert(1, 95_000);
        assert!(Achievement::SpeedRunner.is_earned(&progress));
    }

    #[test]
    fn any_perfect_score_earns_whois_wizard() {
        let mut progress = completed(&[3]);
        progress.record_score(3, 99);
        assert!(!Achievement::WhoisWizard.is_earned(&progress));
        progress.record_score(3, 100);
        assert!(Achievement::WhoisWizard.is_earned(&progress));
    }

    #[test]
    fn metadata_master_needs_both_cases() {
        let mut progress = completed(&[2, 11, 23]);
        assert!(!Achievement::MetadataMaster.is_earned(&progress));
        progress.mark_completed(9);
        assert!(Achievement::MetadataMaster.is_earned(&progress));
        assert_eq!(
            check_new_achievements(&PlayerProgress::new(), &completed(&[9, 2])),
            vec![Achievement::FirstMission, Achievement::MetadataMaster]
        );
    }

    #[test]
    fn results_follow_catalog_order() {
        let mut progress = completed(&[1, 3, 4, 5, 6]);
        progress.record_score(4, 100);
        progress.set_xp(1_600);
        let unlocked = check_new_achievements(&PlayerProgress::new(), &progress);
        assert_eq!(
            unlocked,
            vec![
                Achievement::FirstMission,
                Achievement::DorkLord,
                Achievement::WhoisWizard,
                Achievement::Level5,
            ]
        );
    }

    #[test]
    fn held_achievements_are_not_reported_again() {
        let mut old = PlayerProgress::new();
        old.unlock_achievement(Achievement::FirstMission);
        let new = completed(&[1]);
        assert!(check_new_achievements(&old, &new).is_empty());
    }
}
