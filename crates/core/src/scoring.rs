//! Scoring module - line clears, spins, combos, back-to-back and levels
//!
//! Rules:
//! - Base points come from [`LINE_SCORES`], or [`SPIN_SCORES`] for a spin.
//! - A "difficult" clear (four lines, or any clearing spin) that follows a
//!   difficult clear gets a 3/2 multiplier on its base points.
//! - Hard drop rows and the combo bonus are added to the base points, then
//!   the whole total is multiplied by the level at the time of the lock.
//! - A lock without lines resets the combo streak and the back-to-back flag.

use crate::board::Board;
use crate::config::EngineConfig;
use crate::pieces::ActivePiece;
use crate::types::{
    PieceKind, B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, HARD_DROP_POINTS_PER_ROW,
    LINE_SCORES, SPIN_SCORES,
};

/// Corners of the T piece's 3x3 box around its center at (1, 1).
/// The center is the same for all four orientations.
const T_CORNERS: [(i8, i8); 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the clear (includes B2B multiplier), before level
    pub line_clear_score: u32,
    pub drop_bonus: u32,
    pub combo_bonus: u32,
    /// Everything above multiplied by the level
    pub total: u64,
    /// Four lines or a clearing spin
    pub difficult: bool,
    /// Whether a B2B multiplier was applied to this clear
    pub b2b_applied: bool,
}

/// Base points for a single lock
pub fn line_clear_points(lines: usize, spin: bool) -> u32 {
    let table = if spin { &SPIN_SCORES } else { &LINE_SCORES };
    table.get(lines).copied().unwrap_or(0)
}

/// Four-line clears and clearing spins are "difficult"
pub fn is_difficult(lines: usize, spin: bool) -> bool {
    lines == 4 || (spin && lines > 0)
}

/// Apply the B2B multiplier (3/2, floored) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// Combo bonus for a clearing lock; `streak` counts this lock too.
pub fn combo_bonus(streak: u32) -> u32 {
    if streak > 1 {
        COMBO_BASE.saturating_mul(streak)
    } else {
        0
    }
}

/// Bonus for rows descended by a hard drop
pub fn hard_drop_bonus(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Calculate complete score for a lock.
///
/// `combo_streak` is the streak including this lock (0 when nothing
/// cleared), `previous_b2b` is the flag left by the previous clearing lock.
pub fn calculate_score(
    lines: usize,
    spin: bool,
    combo_streak: u32,
    previous_b2b: bool,
    hard_drop_rows: u32,
    level: u32,
) -> ScoreResult {
    let difficult = is_difficult(lines, spin);
    let base_points = line_clear_points(lines, spin);

    let b2b_applied = difficult && previous_b2b;
    let line_clear_score = if b2b_applied {
        apply_b2b_multiplier(base_points)
    } else {
        base_points
    };

    let drop_bonus = hard_drop_bonus(hard_drop_rows);
    let combo_bonus = if lines > 0 { combo_bonus(combo_streak) } else { 0 };

    let subtotal = u64::from(line_clear_score) + u64::from(drop_bonus) + u64::from(combo_bonus);

    ScoreResult {
        line_clear_score,
        drop_bonus,
        combo_bonus,
        total: subtotal * u64::from(level.max(1)),
        difficult,
        b2b_applied,
    }
}

/// Level for a cumulative line count (levels start at 1)
pub fn level_for_lines(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1) + 1
}

/// Gravity interval for a level: `base * factor^(level-1)`, floored and
/// never below `min_ms`.
pub fn drop_interval_ms(level: u32, base_ms: u32, speed_factor: f64, min_ms: u32) -> u32 {
    let steps = level.max(1) - 1;
    let exponent = i32::try_from(steps).unwrap_or(i32::MAX);
    let interval = (f64::from(base_ms) * speed_factor.powi(exponent)).floor();
    if interval <= f64::from(min_ms) {
        min_ms
    } else {
        interval as u32
    }
}

/// Spin-bonus eligibility for a piece about to lock.
///
/// Only T pieces qualify, only right after a rotation, and only when at least
/// three of the four corner cells around the center are filled or past a side
/// wall or the floor. Corners above the top row are open.
pub fn is_spin(piece: &ActivePiece, last_action_was_rotate: bool, board: &Board) -> bool {
    if piece.kind != PieceKind::T || !last_action_was_rotate {
        return false;
    }

    let filled = T_CORNERS
        .iter()
        .filter(|&&(cx, cy)| board.is_blocked(piece.x + cx, piece.y + cy))
        .count();

    filled >= 3
}

/// Outcome of feeding one lock into the [`ScoringEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockScore {
    pub result: ScoreResult,
    /// Combo streak after this lock
    pub combo: u32,
    pub back_to_back: bool,
    /// New level, when this lock raised it
    pub level_up: Option<u32>,
}

/// Running score, line count, level, combo and back-to-back state
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringEngine {
    score: u64,
    lines: u32,
    level: u32,
    combo: u32,
    back_to_back: bool,
    drop_interval_ms: u32,
    base_drop_ms: u32,
    min_drop_ms: u32,
    speed_factor: f64,
    lines_per_level: u32,
}

impl ScoringEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let mut engine = Self {
            score: 0,
            lines: 0,
            level: 1,
            combo: 0,
            back_to_back: false,
            drop_interval_ms: config.base_drop_ms,
            base_drop_ms: config.base_drop_ms,
            min_drop_ms: config.min_drop_ms,
            speed_factor: config.speed_factor,
            lines_per_level: config.lines_per_level,
        };
        engine.reset();
        engine
    }

    /// Back to level 1 with nothing scored
    pub fn reset(&mut self) {
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.combo = 0;
        self.back_to_back = false;
        self.drop_interval_ms =
            drop_interval_ms(1, self.base_drop_ms, self.speed_factor, self.min_drop_ms);
    }

    /// Score one lock and advance streaks, lines and level
    pub fn record_lock(&mut self, lines: usize, spin: bool, hard_drop_rows: u32) -> LockScore {
        let streak = if lines > 0 {
            self.combo.saturating_add(1)
        } else {
            0
        };

        let result = calculate_score(
            lines,
            spin,
            streak,
            self.back_to_back,
            hard_drop_rows,
            self.level,
        );
        self.score = self.score.saturating_add(result.total);

        let mut level_up = None;
        if lines > 0 {
            self.combo = streak;
            self.back_to_back = result.difficult;
            self.lines = self.lines.saturating_add(lines as u32);

            let level = level_for_lines(self.lines, self.lines_per_level);
            if level > self.level {
                self.level = level;
                self.drop_interval_ms = drop_interval_ms(
                    level,
                    self.base_drop_ms,
                    self.speed_factor,
                    self.min_drop_ms,
                );
                level_up = Some(level);
            }
        } else {
            self.combo = 0;
            self.back_to_back = false;
        }

        LockScore {
            result,
            combo: self.combo,
            back_to_back: self.back_to_back,
            level_up,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    /// Current gravity interval in milliseconds
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    #[cfg(test)]
    pub(crate) fn set_level(&mut self, level: u32) {
        self.level = level;
        self.lines = (level - 1) * self.lines_per_level;
    }

    #[cfg(test)]
    pub(crate) fn set_back_to_back(&mut self, flag: bool) {
        self.back_to_back = flag;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    #[test]
    fn test_base_tables() {
        assert_eq!(line_clear_points(0, false), 0);
        assert_eq!(line_clear_points(1, false), 100);
        assert_eq!(line_clear_points(2, false), 300);
        assert_eq!(line_clear_points(3, false), 500);
        assert_eq!(line_clear_points(4, false), 800);

        assert_eq!(line_clear_points(0, true), 0);
        assert_eq!(line_clear_points(1, true), 400);
        assert_eq!(line_clear_points(2, true), 700);
        assert_eq!(line_clear_points(3, true), 1200);
        assert_eq!(line_clear_points(4, true), 800);
    }

    #[test]
    fn test_single_at_level_one() {
        let result = calculate_score(1, false, 1, false, 0, 1);
        assert_eq!(result.total, 100);
        assert!(!result.difficult);
    }

    #[test]
    fn test_back_to_back_tetris_at_level_three() {
        let result = calculate_score(4, false, 1, true, 0, 3);
        assert!(result.b2b_applied);
        assert_eq!(result.line_clear_score, 1200);
        assert_eq!(result.total, 3600);
    }

    #[test]
    fn test_b2b_multiplier_floors() {
        assert_eq!(apply_b2b_multiplier(0), 0);
        assert_eq!(apply_b2b_multiplier(700), 1050);
        assert_eq!(apply_b2b_multiplier(1), 1);
    }

    #[test]
    fn test_combo_bonus_starts_at_second_clear() {
        assert_eq!(combo_bonus(0), 0);
        assert_eq!(combo_bonus(1), 0);
        assert_eq!(combo_bonus(2), 100);
        assert_eq!(combo_bonus(4), 200);
    }

    #[test]
    fn test_drop_and_combo_are_level_multiplied() {
        // (300 + 2*10 + 50*3) * 2
        let result = calculate_score(2, false, 3, false, 10, 2);
        assert_eq!(result.drop_bonus, 20);
        assert_eq!(result.combo_bonus, 150);
        assert_eq!(result.total, 940);
    }

    #[test]
    fn test_drop_interval_curve() {
        assert_eq!(drop_interval_ms(1, 1000, 0.85, 70), 1000);
        assert_eq!(drop_interval_ms(2, 1000, 0.85, 70), 850);
        assert_eq!(drop_interval_ms(3, 1000, 0.85, 70), 722);
        assert_eq!(drop_interval_ms(30, 1000, 0.85, 70), 70);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0, 10), 1);
        assert_eq!(level_for_lines(9, 10), 1);
        assert_eq!(level_for_lines(10, 10), 2);
        assert_eq!(level_for_lines(35, 10), 4);
    }

    #[test]
    fn test_engine_streaks() {
        let mut engine = ScoringEngine::new(&EngineConfig::default());

        let first = engine.record_lock(4, false, 0);
        assert_eq!(first.result.total, 800);
        assert!(first.back_to_back);
        assert_eq!(first.combo, 1);

        // Back-to-back tetris with a combo of 2: (1200 + 100) * 1
        let second = engine.record_lock(4, false, 0);
        assert!(second.result.b2b_applied);
        assert_eq!(second.result.total, 1300);
        assert_eq!(second.combo, 2);

        // A single breaks the back-to-back chain but keeps the combo.
        let third = engine.record_lock(1, false, 0);
        assert!(!third.back_to_back);
        assert_eq!(third.combo, 3);
        assert_eq!(third.result.total, 100 + 150);
        assert_eq!(engine.lines(), 9);
        assert_eq!(engine.level(), 1);

        let miss = engine.record_lock(0, false, 0);
        assert_eq!(miss.combo, 0);
        assert!(!miss.back_to_back);
    }

    #[test]
    fn test_level_up_speeds_gravity() {
        let mut engine = ScoringEngine::new(&EngineConfig::default());
        assert_eq!(engine.drop_interval_ms(), 1000);

        engine.record_lock(4, false, 0);
        engine.record_lock(4, false, 0);
        let lock = engine.record_lock(2, false, 0);
        assert_eq!(lock.level_up, Some(2));
        assert_eq!(engine.level(), 2);
        assert_eq!(engine.drop_interval_ms(), 850);
    }

    #[test]
    fn test_spin_needs_t_and_rotation() {
        let mut board = Board::new();
        board.fill_row(19, PieceKind::I, Some(4));
        board.set(3, 17, Some(PieceKind::L));
        let piece = ActivePiece {
            kind: PieceKind::T,
            rotation: Rotation::South,
            x: 3,
            y: 17,
        };
        // Corners: (3,17) filled, (5,17) empty, (3,19) and (5,19) filled.
        assert!(is_spin(&piece, true, &board));
        assert!(!is_spin(&piece, false, &board));

        let not_t = ActivePiece {
            kind: PieceKind::S,
            ..piece
        };
        assert!(!is_spin(&not_t, true, &board));
    }

    #[test]
    fn test_spin_counts_walls() {
        let board = Board::new();
        // Against the left wall on the floor: two corners off-board, two empty.
        let piece = ActivePiece {
            kind: PieceKind::T,
            rotation: Rotation::East,
            x: -1,
            y: 17,
        };
        assert!(!is_spin(&piece, true, &board));

        // In the bottom-left corner: (-1,18), (-1,20), (1,20) off-board.
        let cornered = ActivePiece { y: 18, ..piece };
        assert!(is_spin(&cornered, true, &board));
    }

    #[test]
    fn test_spin_ignores_ceiling() {
        let mut board = Board::new();
        board.set(3, 1, Some(PieceKind::L));
        board.set(5, 1, Some(PieceKind::L));
        // Top corners (3,-1) and (5,-1) sit above the board.
        let piece = ActivePiece {
            kind: PieceKind::T,
            rotation: Rotation::North,
            x: 3,
            y: -1,
        };
        assert!(!is_spin(&piece, true, &board));

        // One row lower, three real corners count.
        let mut board = Board::new();
        board.set(3, 0, Some(PieceKind::L));
        board.set(5, 0, Some(PieceKind::L));
        board.set(3, 2, Some(PieceKind::L));
        let lower = ActivePiece { y: 0, ..piece };
        assert!(is_spin(&lower, true, &board));
    }
}
