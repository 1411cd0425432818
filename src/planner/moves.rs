//! Move generation: ring rotations and diagonal shifts
//!
//! A ring rotation turns every pew on one ring by the same number of diagonal
//! slots. A diagonal shift moves every pew on one diagonal one ring inward or
//! outward; pews already at the boundary stay put, and pews that land on the
//! same ring merge (which always breaks the pair count, so such shifts are
//! discarded as invalid).

use serde::{Deserialize, Serialize};

use crate::occupancy::arrangement::DIAGONAL_SPACING_DEGREES;
use crate::occupancy::matrix::{DIAGONAL_NAMES, RING_NAMES};
use crate::occupancy::{Matrix, Placement, DIAGONAL_COUNT, PAIR, RING_COUNT};

use super::context::{RotationDirection, SearchContext};

/// Which axis a move acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Ring,
    Diagonal,
}

/// Direction of travel for every pew in a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Clockwise,
    Counterclockwise,
    Inward,
    Outward,
}

impl From<RotationDirection> for MoveDirection {
    fn from(direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => Self::Clockwise,
            RotationDirection::Counterclockwise => Self::Counterclockwise,
        }
    }
}

/// Radial direction of a diagonal shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radial {
    Inward,
    Outward,
}

impl Radial {
    fn apply(self, ring: usize) -> usize {
        match self {
            Self::Inward => ring.saturating_sub(1),
            Self::Outward => (ring + 1).min(RING_COUNT - 1),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Inward => "inward",
            Self::Outward => "outward",
        }
    }
}

impl From<Radial> for MoveDirection {
    fn from(radial: Radial) -> Self {
        match radial {
            Radial::Inward => Self::Inward,
            Radial::Outward => Self::Outward,
        }
    }
}

/// Where one pew starts and ends during a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PewMotion {
    pub from: Placement,
    pub to: Placement,
}

/// Everything a renderer needs to animate a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub kind: MoveKind,
    /// Ring index for rotations, diagonal index for shifts
    pub axis: u8,
    pub direction: MoveDirection,
    pub pews: Vec<PewMotion>,
    /// Arc travelled by each rotating pew
    pub angular_degrees: u16,
    /// Rings travelled by each shifting pew
    pub radial_steps: u8,
}

/// One legal transition between valid matrices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The configuration after the move
    pub matrix: Matrix,
    pub description: String,
    pub animation: Animation,
}

/// Every legal move from `matrix`, ignoring rotation commitments
///
/// Order: rings innermost first (clockwise before counterclockwise), then
/// diagonals 0..2 (inward before outward). Moves that leave the matrix
/// unchanged or produce an invalid one are dropped.
pub fn all_moves(matrix: &Matrix) -> Vec<Move> {
    let mut moves = Vec::new();

    for ring in 0..RING_COUNT {
        if matrix.ring(ring).iter().all(|&c| c == 0) {
            continue;
        }
        for slots in 1..DIAGONAL_COUNT {
            if let Some(mv) = rotate_ring(matrix, ring, slots) {
                moves.push(mv);
            }
        }
    }

    for diagonal in 0..DIAGONAL_COUNT {
        if matrix.diagonal(diagonal).iter().all(|&c| c == 0) {
            continue;
        }
        for radial in [Radial::Inward, Radial::Outward] {
            if let Some(mv) = shift_diagonal(matrix, diagonal, radial) {
                moves.push(mv);
            }
        }
    }

    moves
}

/// Legal moves from `matrix` that respect the context's rotation commitments
pub fn valid_moves(matrix: &Matrix, ctx: &mut SearchContext) -> Vec<Move> {
    ctx.record_expansion();
    all_moves(matrix)
        .into_iter()
        .filter(|mv| match (mv.animation.kind, mv.animation.direction) {
            (MoveKind::Ring, MoveDirection::Clockwise) => {
                ctx.admit_rotation(usize::from(mv.animation.axis), RotationDirection::Clockwise)
            }
            (MoveKind::Ring, MoveDirection::Counterclockwise) => ctx.admit_rotation(
                usize::from(mv.animation.axis),
                RotationDirection::Counterclockwise,
            ),
            _ => true,
        })
        .collect()
}

/// Whether `to` is one legal move away from `from`
pub fn is_single_move(from: &Matrix, to: &Matrix) -> bool {
    all_moves(from).iter().any(|mv| mv.matrix == *to)
}

/// Direction needing fewer single-slot steps to shift a ring by `slots`
/// (clockwise wins ties)
fn rotation_for(slots: usize) -> (RotationDirection, usize) {
    let counter = DIAGONAL_COUNT - slots;
    if slots <= counter {
        (RotationDirection::Clockwise, slots)
    } else {
        (RotationDirection::Counterclockwise, counter)
    }
}

fn rotate_ring(matrix: &Matrix, ring: usize, slots: usize) -> Option<Move> {
    let current = matrix.ring(ring);
    let mut rotated = [0u8; DIAGONAL_COUNT];
    for (diagonal, &cell) in current.iter().enumerate() {
        rotated[(diagonal + slots) % DIAGONAL_COUNT] = cell;
    }

    let next = matrix.with_ring(ring, rotated);
    if next == *matrix || !next.is_valid() {
        return None;
    }

    let (direction, steps) = rotation_for(slots);
    let sweep = direction.step_degrees() * steps as i32;
    let pews = occupied_placements(matrix, ring, None)
        .map(|from| PewMotion {
            from,
            to: Placement::at_angle(from.ring, i32::from(from.angle_degrees()) + sweep),
        })
        .collect();

    Some(Move {
        matrix: next,
        description: format!(
            "Rotate {} ring {}",
            RING_NAMES[ring].to_lowercase(),
            direction
        ),
        animation: Animation {
            kind: MoveKind::Ring,
            axis: ring as u8,
            direction: direction.into(),
            pews,
            angular_degrees: DIAGONAL_SPACING_DEGREES * steps as u16,
            radial_steps: 0,
        },
    })
}

fn shift_diagonal(matrix: &Matrix, diagonal: usize, radial: Radial) -> Option<Move> {
    let current = matrix.diagonal(diagonal);
    let mut shifted = [0u8; RING_COUNT];
    for (ring, &cell) in current.iter().enumerate() {
        if cell != 0 {
            shifted[radial.apply(ring)] = PAIR;
        }
    }

    let next = matrix.with_diagonal(diagonal, shifted);
    if next == *matrix || !next.is_valid() {
        return None;
    }

    let pews = occupied_placements(matrix, 0, Some(diagonal))
        .filter_map(|from| {
            let ring = radial.apply(usize::from(from.ring)) as u8;
            (ring != from.ring).then(|| PewMotion {
                from,
                to: Placement::new(ring, from.diagonal, from.side),
            })
        })
        .collect();

    Some(Move {
        matrix: next,
        description: format!(
            "Shift {} diagonal pews {}",
            DIAGONAL_NAMES[diagonal].to_lowercase(),
            radial.as_str()
        ),
        animation: Animation {
            kind: MoveKind::Diagonal,
            axis: diagonal as u8,
            direction: radial.into(),
            pews,
            angular_degrees: 0,
            radial_steps: 1,
        },
    })
}

/// Both pews of every occupied cell on a ring, or on a diagonal when given
fn occupied_placements(
    matrix: &Matrix,
    ring: usize,
    diagonal: Option<usize>,
) -> impl Iterator<Item = Placement> + '_ {
    matrix
        .occupied()
        .filter(move |&(r, d)| match diagonal {
            Some(diagonal) => d == diagonal,
            None => r == ring,
        })
        .flat_map(|(r, d)| {
            [0, 1].map(|side| Placement::new(r as u8, d as u8, side))
        })
}
