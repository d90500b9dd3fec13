//! Pieces module - tetromino geometry and rotation kick tables
//!
//! Shapes live in a 4x4 bounding box whose top-left corner is the piece
//! position on the board. Kick offsets are expressed in board coordinates
//! (x grows to the right, y grows downward).
//! Reference: https://tetris.wiki/SRS

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{PieceKind, Rotation, RotationDirection, BOARD_WIDTH};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Occupancy matrix of a piece's bounding box, indexed `[row][col]`
pub type ShapeMatrix = [[bool; 4]; 4];

/// Spawn position for new pieces (x, y): horizontally centered, one row
/// above the visible area.
pub const SPAWN_POSITION: (i8, i8) = ((BOARD_WIDTH as i8 - 4) / 2, -1);

/// Which kick tables the rotate command consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationSystem {
    /// Standard SRS tables: I has its own table, O only tries the zero offset
    #[default]
    Srs,
    /// Horizontal nudges 0, +1, -1, +2, -2 for every kind
    Classic,
    /// No kicks; only the unshifted rotation is tried
    Fixed,
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// Get the 4x4 occupancy matrix for a piece kind and rotation
pub fn get_matrix(kind: PieceKind, rotation: Rotation) -> ShapeMatrix {
    let mut matrix = [[false; 4]; 4];
    for (dx, dy) in get_shape(kind, rotation) {
        matrix[dy as usize][dx as usize] = true;
    }
    matrix
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // N: horizontal, row 1
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // E: vertical, column 2
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // S: horizontal, row 2
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // W: vertical, column 1
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

/// T piece shapes
fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// S piece shapes
fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// Z piece shapes
fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

/// J piece shapes
fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

/// L piece shapes
fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Kick offsets for the 8 rotation transitions, first entry is always (0, 0)
pub type KickTable = [[(i8, i8); 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z), y pointing down
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3 (N->W)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->0 (E->N)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->2 (E->S)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->1 (S->E)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->3 (S->W)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->2 (W->S)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->0 (W->N)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table, y pointing down
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

const CLASSIC_KICKS: [(i8, i8); 5] = [(0, 0), (1, 0), (-1, 0), (2, 0), (-2, 0)];

const NO_KICKS: [(i8, i8); 1] = [(0, 0)];

/// Get the kick index for a rotation transition
fn get_kick_index(from: Rotation, direction: RotationDirection) -> usize {
    use RotationDirection::{Clockwise, CounterClockwise};
    match (from, direction) {
        (Rotation::North, Clockwise) => 0,
        (Rotation::North, CounterClockwise) => 1,
        (Rotation::East, CounterClockwise) => 2,
        (Rotation::East, Clockwise) => 3,
        (Rotation::South, CounterClockwise) => 4,
        (Rotation::South, Clockwise) => 5,
        (Rotation::West, CounterClockwise) => 6,
        (Rotation::West, Clockwise) => 7,
    }
}

/// Ordered offsets to try when rotating `kind` out of `from`.
///
/// Every list starts with the zero offset.
pub fn get_kicks(
    kind: PieceKind,
    from: Rotation,
    direction: RotationDirection,
    system: RotationSystem,
) -> &'static [(i8, i8)] {
    match system {
        RotationSystem::Fixed => &NO_KICKS,
        RotationSystem::Classic => &CLASSIC_KICKS,
        RotationSystem::Srs => match kind {
            PieceKind::O => &NO_KICKS,
            PieceKind::I => &I_KICKS[get_kick_index(from, direction)],
            _ => &JLSTZ_KICKS[get_kick_index(from, direction)],
        },
    }
}

/// A piece in play: kind, orientation and the board position of its
/// bounding box's top-left corner. `y` may be negative while spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a new piece at the spawn position, orientation 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Get the shape (mino offsets) for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece translated by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece at a new orientation, position unchanged
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            rotation: self.rotation.turned(direction),
            ..*self
        }
    }

    /// Check if the cell directly below any mino is blocked
    pub fn is_grounded(&self, board: &Board) -> bool {
        board.collides(&self.shifted(0, 1))
    }
}

/// Try the kick list for a rotation and return the first placement that
/// does not collide, or `None` when every offset is blocked.
pub fn attempt_kick(
    piece: &ActivePiece,
    direction: RotationDirection,
    system: RotationSystem,
    board: &Board,
) -> Option<ActivePiece> {
    let turned = piece.rotated(direction);
    get_kicks(piece.kind, piece.rotation, direction, system)
        .iter()
        .map(|&(dx, dy)| turned.shifted(dx, dy))
        .find(|candidate| !board.collides(candidate))
}
