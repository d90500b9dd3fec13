//! Piece controller - the active piece state machine
//!
//! A piece is airborne until the cell below one of its minos is blocked,
//! then grounded while the lock timer runs, then locked when the engine
//! takes it for merging. The controller also owns the hold slot.

use crate::board::Board;
use crate::config::{EngineConfig, SoftDropMode};
use crate::pieces::{attempt_kick, ActivePiece, RotationSystem};
use crate::types::{PieceKind, RotationDirection};

/// Rows the active piece may be lifted to escape cells shifted into it
const MAX_LIFT_ROWS: i8 = 4;

/// Result of a soft drop command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftDrop {
    /// The piece moved down one row
    Moved,
    /// The cell below is blocked; the piece is now grounded
    Grounded,
    /// The cell below is blocked and the piece must lock now
    Lock,
    /// No active piece
    Ignored,
}

/// Result of a hold command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Hold is disabled, already used, or there is no active piece
    Rejected,
    /// The active piece went into the empty slot and a new piece spawned
    Stored,
    /// The active piece was exchanged with the held one
    Swapped,
    /// The slot took the active piece but its replacement could not spawn
    Blocked,
}

#[derive(Debug, Clone)]
pub struct PieceController {
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    grounded: bool,
    lock_timer_ms: u32,
    lock_resets: u32,
    last_action_was_rotate: bool,
    rotation_system: RotationSystem,
    hold_enabled: bool,
    soft_drop_mode: SoftDropMode,
    max_lock_resets: Option<u32>,
}

impl PieceController {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            active: None,
            hold: None,
            can_hold: true,
            grounded: false,
            lock_timer_ms: 0,
            lock_resets: 0,
            last_action_was_rotate: false,
            rotation_system: config.rotation_system,
            hold_enabled: config.hold_enabled,
            soft_drop_mode: config.soft_drop_mode,
            max_lock_resets: config.max_lock_resets,
        }
    }

    /// Drop the active piece and the hold slot
    pub fn reset(&mut self) {
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.clear_piece_state();
    }

    fn clear_piece_state(&mut self) {
        self.grounded = false;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        self.last_action_was_rotate = false;
    }

    /// Place a new piece of `kind` at the spawn position.
    ///
    /// Returns false, leaving no active piece, when the spawn placement
    /// collides.
    pub fn spawn(&mut self, kind: PieceKind, board: &Board) -> bool {
        let piece = ActivePiece::spawn(kind);
        self.clear_piece_state();
        if board.collides(&piece) {
            self.active = None;
            return false;
        }
        self.active = Some(piece);
        self.can_hold = true;
        true
    }

    /// Translate the active piece by (dx, dy) if the target is free
    pub fn try_move(&mut self, dx: i8, dy: i8, board: &Board) -> bool {
        if !self.shift(dx, dy, board) {
            return false;
        }
        self.last_action_was_rotate = false;
        self.reset_lock();
        true
    }

    /// One row of gravity. A step that moves the piece counts as a
    /// translation for spin detection but does not reset the lock timer.
    pub fn gravity_step(&mut self, board: &Board) -> bool {
        let moved = self.shift(0, 1, board);
        if moved {
            self.last_action_was_rotate = false;
        }
        moved
    }

    fn shift(&mut self, dx: i8, dy: i8, board: &Board) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = active.shifted(dx, dy);
        if board.collides(&candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Rotate with kick resolution; the piece is unchanged when every
    /// offset collides.
    pub fn try_rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let Some(rotated) = attempt_kick(&active, direction, self.rotation_system, board) else {
            return false;
        };
        self.active = Some(rotated);
        self.last_action_was_rotate = true;
        self.reset_lock();
        true
    }

    /// Clear the grounded flag and lock timer, counting against the reset cap
    /// when the piece was resting.
    fn reset_lock(&mut self) {
        if self.grounded {
            if let Some(max) = self.max_lock_resets {
                if self.lock_resets >= max {
                    return;
                }
            }
            self.lock_resets += 1;
        }
        self.grounded = false;
        self.lock_timer_ms = 0;
    }

    pub fn soft_drop(&mut self, board: &Board) -> SoftDrop {
        if self.active.is_none() {
            return SoftDrop::Ignored;
        }
        if self.try_move(0, 1, board) {
            return SoftDrop::Moved;
        }
        match self.soft_drop_mode {
            SoftDropMode::GroundCheck => {
                self.grounded = true;
                SoftDrop::Grounded
            }
            SoftDropMode::Lock => SoftDrop::Lock,
        }
    }

    /// Move the piece to its landing row and return the rows descended.
    /// The caller locks the piece afterwards.
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let Some(active) = self.active else {
            return 0;
        };
        let rows = Self::drop_distance(&active, board);
        if rows > 0 {
            self.active = Some(active.shifted(0, rows as i8));
            self.last_action_was_rotate = false;
        }
        rows
    }

    fn drop_distance(piece: &ActivePiece, board: &Board) -> u32 {
        let mut rows: i8 = 0;
        while !board.collides(&piece.shifted(0, rows + 1)) {
            rows += 1;
        }
        rows as u32
    }

    /// Row the active piece would land on
    pub fn ghost_y(&self, board: &Board) -> Option<i8> {
        let active = self.active?;
        Some(active.y + Self::drop_distance(&active, board) as i8)
    }

    /// Swap the active piece with the hold slot.
    ///
    /// `draw` supplies the next queued kind when the slot is empty.
    pub fn hold(&mut self, board: &Board, draw: impl FnOnce() -> PieceKind) -> HoldOutcome {
        if !self.hold_enabled || !self.can_hold {
            return HoldOutcome::Rejected;
        }
        let Some(active) = self.active else {
            return HoldOutcome::Rejected;
        };

        let (next, outcome) = match self.hold.replace(active.kind) {
            Some(held) => (held, HoldOutcome::Swapped),
            None => (draw(), HoldOutcome::Stored),
        };

        let spawned = self.spawn(next, board);
        self.can_hold = false;
        if spawned {
            outcome
        } else {
            HoldOutcome::Blocked
        }
    }

    /// Re-test the cell below at the start of a tick.
    ///
    /// Leaving the ground zeroes the lock timer.
    pub fn refresh_grounded(&mut self, board: &Board) -> bool {
        let grounded = self
            .active
            .map(|piece| piece.is_grounded(board))
            .unwrap_or(false);
        if !grounded {
            self.lock_timer_ms = 0;
        }
        self.grounded = grounded;
        grounded
    }

    /// Add resting time; true once the lock delay is reached
    pub fn accumulate_lock(&mut self, elapsed_ms: u32, lock_delay_ms: u32) -> bool {
        self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
        self.lock_timer_ms >= lock_delay_ms
    }

    /// Remove the active piece for locking, with its rotate flag
    pub fn take_for_lock(&mut self) -> Option<(ActivePiece, bool)> {
        let piece = self.active.take()?;
        let rotated = self.last_action_was_rotate;
        self.clear_piece_state();
        Some((piece, rotated))
    }

    /// Lift the active piece until it no longer overlaps the board.
    ///
    /// Returns false, removing the piece, when no free placement exists
    /// within the lift range.
    pub fn settle_upward(&mut self, board: &Board) -> bool {
        let Some(active) = self.active else {
            return true;
        };
        match (0..=MAX_LIFT_ROWS)
            .map(|rows| active.shifted(0, -rows))
            .find(|candidate| !board.collides(candidate))
        {
            Some(free) => {
                self.active = Some(free);
                true
            }
            None => {
                self.active = None;
                false
            }
        }
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn last_action_was_rotate(&self) -> bool {
        self.last_action_was_rotate
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Option<ActivePiece>) {
        self.active = piece;
        self.clear_piece_state();
    }
}
