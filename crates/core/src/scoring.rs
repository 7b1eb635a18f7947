//! Scoring module - line clear points, level and gravity curve
//!
//! Levels are derived from the score alone (one level per 1000 points), and
//! each level takes 50ms off the gravity interval until it bottoms out at
//! 300ms.

use crate::types::{
    BASE_GRAVITY_MS, GRAVITY_STEP_MS, LINE_CLEAR_SCORES, MIN_GRAVITY_MS, SCORE_PER_LEVEL,
};

/// Points for clearing `lines` rows in a single lock (0 when there is no
/// table entry)
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_CLEAR_SCORES.get(lines).copied().unwrap_or(0)
}

/// Level for a score
pub fn level_for_score(score: u32) -> u32 {
    score / SCORE_PER_LEVEL
}

/// Gravity interval for a level: `max(800 - level * 50, 300)`
pub fn gravity_interval_ms(level: u32) -> u32 {
    BASE_GRAVITY_MS
        .saturating_sub(level.saturating_mul(GRAVITY_STEP_MS))
        .max(MIN_GRAVITY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 250);
        assert_eq!(line_clear_score(3), 450);
        assert_eq!(line_clear_score(4), 700);
        assert_eq!(line_clear_score(5), 0);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_score(0), 0);
        assert_eq!(level_for_score(999), 0);
        assert_eq!(level_for_score(1000), 1);
        assert_eq!(level_for_score(12_345), 12);
    }

    #[test]
    fn test_gravity_curve() {
        assert_eq!(gravity_interval_ms(0), 800);
        assert_eq!(gravity_interval_ms(1), 750);
        assert_eq!(gravity_interval_ms(9), 350);
        assert_eq!(gravity_interval_ms(10), 300);
        assert_eq!(gravity_interval_ms(11), 300);
        assert_eq!(gravity_interval_ms(u32::MAX), 300);
    }
}
