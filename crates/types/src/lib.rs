//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond conversions, so they can
//! be shared by the engine, the input layer and any host (renderer, audio,
//! persistence).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, -1), one row above the visible area
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity at level 1 |
//! | `MIN_DROP_MS` | 70 | Fastest gravity interval |
//! | `SPEED_FACTOR` | 0.85 | Interval multiplier per level |
//! | `LOCK_DELAY_MS` | 500 | Resting time before a grounded piece locks |
//!
//! # Examples
//!
//! ```
//! use stackfall_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::ALL[PieceKind::T.index()], PieceKind::T);
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval at level 1 (1000ms per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity never gets faster than this
pub const MIN_DROP_MS: u32 = 70;

/// Each level multiplies the gravity interval by this factor
pub const SPEED_FACTOR: f64 = 0.85;

/// Accumulated grounded time that forces a lock
pub const LOCK_DELAY_MS: u32 = 500;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Minimum number of upcoming pieces kept in the queue
pub const PREVIEW_LEN: usize = 5;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop repeat interval in milliseconds (no DAS)
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Line clear points, indexed by lines cleared in one lock
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Spin clear points, indexed by lines cleared in one lock.
///
/// A four line spin is not distinguished and scores like a plain tetris.
pub const SPIN_SCORES: [u32; 5] = [0, 400, 700, 1200, 800];

/// Points per row descended by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Combo bonus per step of the current streak (applies once streak > 1)
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Energy gained per cleared line
pub const ENERGY_PER_LINE: u32 = 25;

/// Extra energy for a clearing spin
pub const ENERGY_SPIN_BONUS: u32 = 30;

/// Extra energy for a clearing lock while the combo streak is above 1
pub const ENERGY_COMBO_BONUS: u32 = 10;

/// Energy for a lock that clears nothing
pub const ENERGY_PER_PLACEMENT: u32 = 5;

/// Energy converted into one special action
pub const ENERGY_PER_SPECIAL: u32 = 100;

/// Maximum number of banked special actions
pub const SPECIAL_CAP: u8 = 3;

/// The seven tetromino piece kinds
///
/// The kind doubles as the identity stored in board cells, so renderers can
/// color settled blocks by the piece that placed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Rotation states, clockwise from the spawn orientation
///
/// The cycle goes: North → East → South → West → North, and
/// [`Rotation::index`] maps it onto orientation indices 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use stackfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// ```
    /// use stackfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotate one step in the given direction
    pub fn turned(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Orientation index (0 = spawn, increasing clockwise)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from an orientation index, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Rotation direction requested by a rotate command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Map a signed direction onto a rotation: positive is clockwise,
    /// negative counter-clockwise, zero is no rotation at all.
    pub fn from_sign(direction: i8) -> Option<Self> {
        match direction {
            d if d > 0 => Some(RotationDirection::Clockwise),
            d if d < 0 => Some(RotationDirection::CounterClockwise),
            _ => None,
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These actions are produced by hosts (keyboard mapping, touch buttons,
/// auto-repeat) and consumed by `Engine::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (if available)
    Hold,
    /// Spend one special action to remove the fullest row
    UseSpecial,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Restart,
}

/// Discrete named events emitted by the engine.
///
/// Audio and HUD collaborators subscribe to these instead of the engine
/// knowing how sound or effects are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// The active piece moved by a player command
    Move,
    /// The active piece rotated
    Rotate,
    /// A soft drop moved the piece one row
    SoftDrop,
    /// A hard drop descended `rows` rows before locking
    HardDrop { rows: u32 },
    /// The active piece went into the hold slot
    Hold,
    /// A piece merged into the board
    Lock { lines: u32 },
    /// A lock completed one or more rows
    Clear { lines: u32, spin: bool },
    /// The level increased
    LevelUp { level: u32 },
    /// Energy converted into a new special action
    SpecialEarned { count: u8 },
    /// A special action removed board row `row`
    SpecialUsed { row: u8 },
    /// A new piece could not be placed; the run is over
    GameOver,
}

impl GameEvent {
    /// Stable event name for hosts that dispatch on strings
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Move => "move",
            GameEvent::Rotate => "rotate",
            GameEvent::SoftDrop => "softDrop",
            GameEvent::HardDrop { .. } => "hardDrop",
            GameEvent::Hold => "hold",
            GameEvent::Lock { .. } => "lock",
            GameEvent::Clear { .. } => "clear",
            GameEvent::LevelUp { .. } => "levelUp",
            GameEvent::SpecialEarned { .. } => "specialEarned",
            GameEvent::SpecialUsed { .. } => "specialUsed",
            GameEvent::GameOver => "gameOver",
        }
    }
}

/// Summary of the most recent lock, polled by hosts after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockSummary {
    pub lines_cleared: u32,
    /// Points awarded by this lock (already multiplied by level)
    pub points: u64,
    pub spin: bool,
    /// Combo streak after this lock
    pub combo: u32,
    /// Back-to-back flag after this lock
    pub back_to_back: bool,
    /// Whether the 1.5x back-to-back multiplier was applied
    pub b2b_applied: bool,
    pub hard_drop_rows: u32,
    pub level_up: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a piece of that kind
pub type Cell = Option<PieceKind>;
