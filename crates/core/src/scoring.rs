//! Scoring module - layer-clear points, REN, perfect clear and back-to-back
//!
//! Scoring runs once per sweep with the total layer count for that sweep:
//! 1. base points from `LINE_SCORES` times the current level,
//! 2. REN bonus `min(50 × ren, 1000)` after incrementing ren,
//! 3. perfect-clear bonus when the grid is empty afterwards,
//! 4. ×1.5 (floored) over the whole sum when this and the previous non-empty
//!    clear both removed 4+ layers,
//! 5. totals, lines and level are updated last, so the level used in step 1 is
//!    the level before this sweep.
//!
//! A sweep that clears nothing only resets ren.

use crate::types::{
    B2B_DENOMINATOR, B2B_NUMERATOR, LINES_PER_LEVEL, LINE_SCORES, PERFECT_CLEAR_BONUS,
    REN_BONUS_CAP, REN_BONUS_STEP, SPECIAL_CLEAR_LINES,
};

/// Breakdown of one sweep's award
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Table points times level
    pub line_clear_score: u32,
    pub ren_bonus: u32,
    pub perfect_clear_bonus: u32,
    /// Whether the back-to-back multiplier was applied to the sum.
    pub b2b_applied: bool,
    pub total: u32,
}

/// Base points for a sweep: table value times level.
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// REN bonus for the (already incremented) ren count
pub fn calculate_ren_bonus(ren: u32) -> u32 {
    REN_BONUS_STEP.saturating_mul(ren).min(REN_BONUS_CAP)
}

/// Perfect-clear bonus keyed by `min(lines, 4)`; zero lines earn nothing.
pub fn calculate_perfect_clear_bonus(lines: u32) -> u32 {
    let idx = (lines as usize).min(PERFECT_CLEAR_BONUS.len() - 1);
    PERFECT_CLEAR_BONUS[idx]
}

pub fn is_special_clear(lines: u32) -> bool {
    lines >= SPECIAL_CLEAR_LINES
}

/// Apply the back-to-back multiplier (3/2, floored).
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    ((points as u64 * B2B_NUMERATOR as u64) / B2B_DENOMINATOR as u64).min(u32::MAX as u64) as u32
}

/// Level for a cleared-line total: one level per ten layers, starting at 1.
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Running score of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Consecutive sweeps that cleared at least one layer
    pub ren: u32,
    /// Whether the last non-empty clear removed 4+ layers
    pub last_clear_special: bool,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            ren: 0,
            last_clear_special: false,
        }
    }
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sweep into the running score.
    ///
    /// `perfect_clear` is whether the grid was empty after the sweep.
    pub fn apply_sweep(&mut self, cleared: u32, perfect_clear: bool) -> ScoreResult {
        if cleared == 0 {
            self.ren = 0;
            return ScoreResult::default();
        }

        let line_clear_score = calculate_line_score(cleared, self.level);

        self.ren = self.ren.saturating_add(1);
        let ren_bonus = calculate_ren_bonus(self.ren);

        let perfect_clear_bonus = if perfect_clear {
            calculate_perfect_clear_bonus(cleared)
        } else {
            0
        };

        let mut total = line_clear_score
            .saturating_add(ren_bonus)
            .saturating_add(perfect_clear_bonus);

        let special = is_special_clear(cleared);
        let b2b_applied = special && self.last_clear_special;
        if b2b_applied {
            total = apply_b2b_multiplier(total);
        }
        self.last_clear_special = special;

        self.score = self.score.saturating_add(total);
        self.lines = self.lines.saturating_add(cleared);
        self.level = self.level.max(calculate_level(self.lines));

        ScoreResult {
            line_clear_score,
            ren_bonus,
            perfect_clear_bonus,
            b2b_applied,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);
        assert_eq!(calculate_line_score(5, 1), 1200);
        assert_eq!(calculate_line_score(6, 1), 1600);
        assert_eq!(calculate_line_score(9, 1), 1600);
        assert_eq!(calculate_line_score(4, 3), 2400);
        assert_eq!(calculate_line_score(0, 5), 0);
    }

    #[test]
    fn test_ren_bonus_caps() {
        assert_eq!(calculate_ren_bonus(1), 50);
        assert_eq!(calculate_ren_bonus(4), 200);
        assert_eq!(calculate_ren_bonus(20), 1000);
        assert_eq!(calculate_ren_bonus(500), 1000);
    }

    #[test]
    fn test_perfect_clear_bonus() {
        assert_eq!(calculate_perfect_clear_bonus(0), 0);
        assert_eq!(calculate_perfect_clear_bonus(1), 800);
        assert_eq!(calculate_perfect_clear_bonus(2), 1000);
        assert_eq!(calculate_perfect_clear_bonus(3), 1800);
        assert_eq!(calculate_perfect_clear_bonus(4), 2000);
        assert_eq!(calculate_perfect_clear_bonus(7), 2000);
    }

    #[test]
    fn test_b2b_multiplier_floors() {
        assert_eq!(apply_b2b_multiplier(0), 0);
        assert_eq!(apply_b2b_multiplier(1650), 2475);
        assert_eq!(apply_b2b_multiplier(101), 151);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
    }

    #[test]
    fn single_clear_at_level_one() {
        let mut state = ScoreState::new();
        let result = state.apply_sweep(1, false);
        assert_eq!(result.line_clear_score, 100);
        assert_eq!(result.ren_bonus, 50);
        assert_eq!(result.total, 150);
        assert_eq!(state.ren, 1);
        assert!(!state.last_clear_special);
    }

    #[test]
    fn empty_sweep_only_resets_ren() {
        let mut state = ScoreState {
            score: 700,
            level: 2,
            lines: 12,
            ren: 5,
            last_clear_special: true,
        };
        let result = state.apply_sweep(0, false);
        assert_eq!(result, ScoreResult::default());
        assert_eq!(state.ren, 0);
        assert_eq!(state.score, 700);
        assert_eq!(state.level, 2);
        assert_eq!(state.lines, 12);
        assert!(state.last_clear_special);
    }

    #[test]
    fn back_to_back_multiplies_whole_sum() {
        let mut state = ScoreState {
            level: 2,
            lines: 10,
            last_clear_special: true,
            ..ScoreState::default()
        };
        let result = state.apply_sweep(4, false);
        // (800 * 2 + 50) * 1.5
        assert_eq!(result.total, 2475);
        assert!(result.b2b_applied);
        assert!(state.last_clear_special);
    }

    #[test]
    fn non_special_clear_breaks_back_to_back() {
        let mut state = ScoreState {
            last_clear_special: true,
            ..ScoreState::default()
        };
        let result = state.apply_sweep(2, false);
        assert!(!result.b2b_applied);
        assert!(!state.last_clear_special);
    }

    #[test]
    fn level_uses_value_before_sweep() {
        let mut state = ScoreState {
            lines: 9,
            ..ScoreState::default()
        };
        let result = state.apply_sweep(1, false);
        assert_eq!(result.line_clear_score, 100);
        assert_eq!(state.level, 2);
    }
}
