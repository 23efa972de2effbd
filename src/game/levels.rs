//! XP and level curve
//!
//! Quadratic curve: level `L` starts at `(L - 1)^2 * 100` XP. All arithmetic
//! is integer so the curve round-trips exactly.

use crate::data::GameMode;
use serde::Serialize;

/// XP per "square" of the curve
const XP_SCALE: u64 = 100;

/// `floor(sqrt(xp / 100)) + 1`
pub fn calculate_level(xp: u64) -> u32 {
    // floor(sqrt(xp / 100)) == isqrt(floor(xp / 100))
    (isqrt(xp / XP_SCALE) + 1) as u32
}

/// Total XP at which `level` is first reached; `xp_for_level(1) == 0`
///
/// Saturates at `u64::MAX` for levels past the top of the XP range.
pub fn xp_for_level(level: u32) -> u64 {
    let steps = level.saturating_sub(1) as u64;
    steps.saturating_mul(steps).saturating_mul(XP_SCALE)
}

/// Threshold of the level after the one `xp` sits in
pub fn xp_for_next_level(xp: u64) -> u64 {
    xp_for_level(calculate_level(xp).saturating_add(1))
}

/// `floor(base_xp * mode_multiplier * score / 100)`, score clamped to 0..=100
pub fn calculate_mission_xp(base_xp: u32, mode: GameMode, score: i64) -> u64 {
    let score = score.clamp(0, 100) as u64;
    let (num, den) = mode.xp_ratio();
    (base_xp as u64 * num * score) / (den * 100)
}

/// Position within the current level, for progress bars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    pub current_level_xp: u64,
    pub next_level_xp: u64,
    pub percent: f64,
}

impl LevelProgress {
    pub fn from_xp(xp: u64) -> Self {
        let level = calculate_level(xp);
        let floor = xp_for_level(level);
        let next = xp_for_level(level.saturating_add(1));
        let percent = if next > floor {
            xp.saturating_sub(floor) as f64 / (next - floor) as f64 * 100.0
        } else {
            100.0
        };
        Self {
            level,
            current_level_xp: floor,
            next_level_xp: next,
            percent,
        }
    }
}

/// Integer square root (largest `r` with `r * r <= n`)
fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut r = (n as f64).sqrt() as u64;
    // float estimate can be off by one either way for large n
    while r.checked_mul(r).map_or(true, |sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).map_or(false, |sq| sq <= n) {
        r += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_xp_is_level_one() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(xp_for_level(1), 0);
        assert_eq!(xp_for_level(0), 0);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(calculate_level(99), 1);
        assert_eq!(calculate_level(100), 2);
        assert_eq!(calculate_level(399), 2);
        assert_eq!(calculate_level(400), 3);
        assert_eq!(calculate_level(80), 1);
    }

    #[test]
    fn thresholds_round_trip() {
        for level in 1..=500 {
            assert_eq!(calculate_level(xp_for_level(level)), level, "level {}", level);
            if level > 1 {
                assert_eq!(calculate_level(xp_for_level(level) - 1), level - 1);
            }
        }
    }

    #[test]
    fn level_is_monotonic() {
        let mut last = calculate_level(0);
        for xp in (0..200_000).step_by(37) {
            let level = calculate_level(xp);
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn next_level_threshold() {
        assert_eq!(xp_for_next_level(0), 100);
        assert_eq!(xp_for_next_level(150), 400);
        assert_eq!(xp_for_next_level(400), 900);
    }

    #[test]
    fn mission_xp_scales_by_mode_and_score() {
        assert_eq!(calculate_mission_xp(100, GameMode::Beginner, 100), 100);
        assert_eq!(calculate_mission_xp(100, GameMode::Beginner, 80), 80);
        assert_eq!(calculate_mission_xp(100, GameMode::Expert, 80), 120);
        assert_eq!(calculate_mission_xp(150, GameMode::Expert, 77), 173);
        assert_eq!(calculate_mission_xp(250, GameMode::Beginner, 0), 0);
    }

    #[test]
    fn mission_xp_clamps_score() {
        assert_eq!(calculate_mission_xp(100, GameMode::Beginner, 150), 100);
        assert_eq!(calculate_mission_xp(100, GameMode::Expert, -20), 0);
    }

    #[test]
    fn progress_within_level() {
        let progress = LevelProgress::from_xp(250);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.current_level_xp, 100);
        assert_eq!(progress.next_level_xp, 400);
        assert!((progress.percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn top_of_xp_range_does_not_overflow() {
        let level = calculate_level(u64::MAX);
        assert_eq!(level, 429_496_730);
        assert!(xp_for_level(level) <= u64::MAX);
        assert_eq!(xp_for_level(u32::MAX), u64::MAX);
        assert_eq!(xp_for_next_level(u64::MAX), u64::MAX);

        let progress = LevelProgress::from_xp(u64::MAX);
        assert_eq!(progress.level, level);
        assert!(progress.percent >= 0.0 && progress.percent <= 100.0);
    }

    #[test]
    fn isqrt_exact_near_squares() {
        for r in [0u64, 1, 2, 3, 1_000, 4_294_967_295] {
            assert_eq!(isqrt(r * r), r);
            if r > 0 {
                assert_eq!(isqrt(r * r - 1), r - 1);
            }
        }
    }
}
