//! Physical arrangements: concrete pew positions realizing a vector
//!
//! Each pew-pair occupies both sides of one ring/diagonal intersection. A pew
//! on diagonal `d` and side `s` sits at angle `60°·d + 180°·s` from the
//! horizontal, so the six positions of a ring are spaced 60° apart.

use serde::{Deserialize, Serialize};

use super::matrix::Matrix;
use super::vector::OccupancyVector;
use super::{DIAGONAL_COUNT, PAIR, RING_COUNT};

/// Angle between neighbouring diagonals, in degrees
pub const DIAGONAL_SPACING_DEGREES: u16 = 60;

/// One pew position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Placement {
    pub ring: u8,
    pub diagonal: u8,
    /// 0 at the diagonal's base angle, 1 on the opposite side
    pub side: u8,
}

impl Placement {
    pub const fn new(ring: u8, diagonal: u8, side: u8) -> Self {
        Self {
            ring,
            diagonal,
            side,
        }
    }

    /// Angle from the horizontal, in `[0, 360)`
    pub fn angle_degrees(&self) -> u16 {
        u16::from(self.diagonal) * DIAGONAL_SPACING_DEGREES + u16::from(self.side) * 180
    }

    /// The position on `ring` at `angle` degrees (any multiple of 60)
    pub fn at_angle(ring: u8, angle: i32) -> Self {
        let slot = angle.rem_euclid(360) / i32::from(DIAGONAL_SPACING_DEGREES);
        let diagonals = DIAGONAL_COUNT as i32;
        Self::new(ring, (slot % diagonals) as u8, (slot / diagonals) as u8)
    }
}

/// The six placements realizing a vector, ring-major, side 0 before side 1
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arrangement(Vec<Placement>);

impl Arrangement {
    /// Expand occupied `(ring, diagonal)` intersections into both sides of each pair
    pub fn from_cells(cells: &[(u8, u8)]) -> Self {
        Self(
            cells
                .iter()
                .flat_map(|&(ring, diagonal)| {
                    [
                        Placement::new(ring, diagonal, 0),
                        Placement::new(ring, diagonal, 1),
                    ]
                })
                .collect(),
        )
    }

    /// The arrangement implied by a matrix: both sides of every occupied cell
    pub fn from_matrix(matrix: &Matrix) -> Self {
        let cells: Vec<(u8, u8)> = matrix
            .occupied()
            .map(|(ring, diagonal)| (ring as u8, diagonal as u8))
            .collect();
        Self::from_cells(&cells)
    }

    pub fn placements(&self) -> &[Placement] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collapse back to per-intersection pair presence
    pub fn to_matrix(&self) -> Matrix {
        let mut cells = [[0u8; DIAGONAL_COUNT]; RING_COUNT];
        for p in &self.0 {
            cells[usize::from(p.ring)][usize::from(p.diagonal)] = PAIR;
        }
        Matrix::new(cells)
    }
}

/// Pre-computed arrangement lists, in the order they are presented
///
/// The five multiply realizable vectors list their full symmetry orbit; the
/// two single-ring vectors have exactly one arrangement.
const KNOWN_ARRANGEMENTS: &[(OccupancyVector, &[[(u8, u8); 3]])] = &[
    (
        OccupancyVector::new([2, 2, 2, 2, 2, 2]),
        &[
            [(0, 0), (1, 1), (2, 2)],
            [(0, 1), (1, 2), (2, 0)],
            [(0, 2), (1, 0), (2, 1)],
            [(0, 0), (1, 2), (2, 1)],
            [(0, 1), (1, 0), (2, 2)],
            [(0, 2), (1, 1), (2, 0)],
        ],
    ),
    (
        OccupancyVector::new([0, 2, 4, 2, 2, 2]),
        &[
            [(1, 0), (2, 1), (2, 2)],
            [(1, 1), (2, 0), (2, 2)],
            [(1, 2), (2, 0), (2, 1)],
        ],
    ),
    (
        OccupancyVector::new([0, 4, 2, 2, 2, 2]),
        &[
            [(1, 0), (1, 1), (2, 2)],
            [(1, 0), (1, 2), (2, 1)],
            [(1, 1), (1, 2), (2, 0)],
        ],
    ),
    (
        OccupancyVector::new([2, 0, 4, 2, 2, 2]),
        &[
            [(0, 0), (2, 1), (2, 2)],
            [(0, 1), (2, 0), (2, 2)],
            [(0, 2), (2, 0), (2, 1)],
        ],
    ),
    (
        OccupancyVector::new([2, 4, 0, 2, 2, 2]),
        &[
            [(0, 0), (1, 1), (1, 2)],
            [(0, 1), (1, 0), (1, 2)],
            [(0, 2), (1, 0), (1, 1)],
        ],
    ),
    (
        OccupancyVector::new([0, 0, 6, 2, 2, 2]),
        &[[(2, 0), (2, 1), (2, 2)]],
    ),
    (
        OccupancyVector::new([0, 6, 0, 2, 2, 2]),
        &[[(1, 0), (1, 1), (1, 2)]],
    ),
];

fn known_arrangements(vector: &OccupancyVector) -> Option<&'static [[(u8, u8); 3]]> {
    KNOWN_ARRANGEMENTS
        .iter()
        .find(|(known, _)| known == vector)
        .map(|(_, cells)| *cells)
}

/// Every distinct arrangement realizing `vector`; empty when it is invalid
pub fn find_all_arrangements(vector: &OccupancyVector) -> Vec<Arrangement> {
    if !vector.is_valid() {
        return Vec::new();
    }

    if let Some(lists) = known_arrangements(vector) {
        return lists.iter().map(|cells| Arrangement::from_cells(cells)).collect();
    }

    vector
        .realizations()
        .iter()
        .map(Arrangement::from_matrix)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_placement_angles() {
        assert_eq!(Placement::new(0, 0, 0).angle_degrees(), 0);
        assert_eq!(Placement::new(0, 2, 0).angle_degrees(), 120);
        assert_eq!(Placement::new(0, 1, 1).angle_degrees(), 240);
    }

    #[test]
    fn test_at_angle_wraps_sides() {
        assert_eq!(Placement::at_angle(2, 180), Placement::new(2, 0, 1));
        assert_eq!(Placement::at_angle(2, 360), Placement::new(2, 0, 0));
        assert_eq!(Placement::at_angle(1, -60), Placement::new(1, 2, 1));
    }

    #[test]
    fn test_uniform_vector_has_full_orbit() {
        let arrangements = find_all_arrangements(&OccupancyVector::new([2, 2, 2, 2, 2, 2]));
        assert_eq!(arrangements.len(), 6);
        let distinct: HashSet<_> = arrangements.iter().cloned().collect();
        assert_eq!(distinct.len(), 6);
        for arrangement in &arrangements {
            assert_eq!(arrangement.len(), 6);
            for pair in arrangement.placements().chunks(2) {
                assert_eq!(pair[0].ring, pair[1].ring);
                assert_eq!(pair[0].diagonal, pair[1].diagonal);
                assert_eq!((pair[0].side, pair[1].side), (0, 1));
            }
        }
    }

    #[test]
    fn test_outer_ring_vector_has_single_arrangement() {
        let arrangements = find_all_arrangements(&OccupancyVector::new([0, 0, 6, 2, 2, 2]));
        assert_eq!(arrangements.len(), 1);
        assert!(arrangements[0].placements().iter().all(|p| p.ring == 2));
    }

    #[test]
    fn test_middle_and_outer_arrangements_cover_each_diagonal_once() {
        let vector = OccupancyVector::new([0, 2, 4, 2, 2, 2]);
        let matrices: Vec<Matrix> = find_all_arrangements(&vector)
            .iter()
            .map(|a| a.to_matrix())
            .collect();
        assert_eq!(
            matrices,
            vec![
                Matrix::new([[0, 0, 0], [2, 0, 0], [0, 2, 2]]),
                Matrix::new([[0, 0, 0], [0, 2, 0], [2, 0, 2]]),
                Matrix::new([[0, 0, 0], [0, 0, 2], [2, 2, 0]]),
            ]
        );
        for m in &matrices {
            assert_eq!(m.to_vector(), vector);
        }
    }

    #[test]
    fn test_invalid_vector_has_no_arrangements() {
        assert!(find_all_arrangements(&OccupancyVector::new([6, 0, 0, 2, 2, 2])).is_empty());
        assert!(find_all_arrangements(&OccupancyVector::new([0, 0, 6, 6, 0, 0])).is_empty());
    }

    #[test]
    fn test_table_matches_enumeration() {
        for (vector, lists) in KNOWN_ARRANGEMENTS {
            let table: HashSet<Matrix> = lists
                .iter()
                .map(|cells| Arrangement::from_cells(cells).to_matrix())
                .collect();
            let enumerated: HashSet<Matrix> = vector.realizations().into_iter().collect();
            assert_eq!(table, enumerated, "table mismatch for {}", vector);
        }
    }

    #[test]
    fn test_enumerated_vector_lists_every_realization() {
        // Not in the table, yet realizable three ways
        let arrangements = find_all_arrangements(&OccupancyVector::new([2, 2, 2, 0, 2, 4]));
        let matrices: Vec<Matrix> = arrangements.iter().map(|a| a.to_matrix()).collect();
        assert_eq!(
            matrices,
            vec![
                Matrix::new([[0, 2, 0], [0, 0, 2], [0, 0, 2]]),
                Matrix::new([[0, 0, 2], [0, 2, 0], [0, 0, 2]]),
                Matrix::new([[0, 0, 2], [0, 0, 2], [0, 2, 0]]),
            ]
        );
    }

    #[test]
    fn test_from_matrix_round_trip() {
        let m = Matrix::new([[0, 0, 2], [2, 0, 0], [0, 2, 0]]);
        let arrangement = Arrangement::from_matrix(&m);
        assert_eq!(arrangement.placements()[0], Placement::new(0, 2, 0));
        assert_eq!(arrangement.to_matrix(), m);
    }
}
