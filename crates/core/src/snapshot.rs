use serde::{Deserialize, Serialize};

use crate::pieces::ActivePiece;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_LEN};

pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute board cells, some possibly above the top row
    pub cells: [(i8, i8); 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

/// Read-only copy of the engine state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: [PieceKind; PREVIEW_LEN],
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub energy: u32,
    /// Progress toward the next special, clamped to 0..=100
    pub energy_percent: u8,
    pub specials: u8,
    pub running: bool,
    pub paused: bool,
    pub combo: u32,
    pub back_to_back: bool,
    pub drop_interval_ms: u32,
    pub lock_ms: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.running && !self.paused
    }

    pub fn game_over(&self) -> bool {
        !self.running
    }

    /// Number of filled board cells
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            can_hold: true,
            next_queue: [PieceKind::I; PREVIEW_LEN],
            score: 0,
            level: 1,
            lines: 0,
            energy: 0,
            energy_percent: 0,
            specials: 0,
            running: false,
            paused: false,
            combo: 0,
            back_to_back: false,
            drop_interval_ms: 0,
            lock_ms: 0,
            seed: 0,
        }
    }
}
