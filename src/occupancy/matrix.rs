//! Occupancy matrices: per-intersection pair presence
//!
//! Rows are rings (0 = innermost) and columns are diagonals. A cell holds 2
//! when a symmetric pair sits at that ring/diagonal intersection, 0 otherwise.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::OccupancyError;
use super::vector::OccupancyVector;
use super::{DIAGONAL_COUNT, PAIR, PAIR_COUNT, RING_COUNT, TOTAL_PEWS};

/// Ring names used in descriptions, innermost first
pub const RING_NAMES: [&str; RING_COUNT] = ["Inner", "Middle", "Outer"];

/// Diagonal names used in descriptions (0°, 60°, 120°)
pub const DIAGONAL_NAMES: [&str; DIAGONAL_COUNT] = [
    "Horizontal",
    "Top-Right to Bottom-Left",
    "Top-Left to Bottom-Right",
];

/// All three pairs on the outer ring
pub const OUTER_RING_STATE: Matrix = Matrix::new([[0, 0, 0], [0, 0, 0], [2, 2, 2]]);

/// 3×3 grid of pair presence, indexed `[ring][diagonal]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix {
    cells: [[u8; DIAGONAL_COUNT]; RING_COUNT],
}

impl Matrix {
    /// Wrap a grid without validating it
    pub const fn new(cells: [[u8; DIAGONAL_COUNT]; RING_COUNT]) -> Self {
        Self { cells }
    }

    pub const fn empty() -> Self {
        Self::new([[0; DIAGONAL_COUNT]; RING_COUNT])
    }

    /// Build a matrix from nested rows, rejecting anything that is not 3×3
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, OccupancyError> {
        if rows.len() != RING_COUNT {
            return Err(OccupancyError::structural(format!(
                "expected {} rings, found {}",
                RING_COUNT,
                rows.len()
            )));
        }
        let mut cells = [[0u8; DIAGONAL_COUNT]; RING_COUNT];
        for (ring, row) in rows.iter().enumerate() {
            cells[ring] = row.as_slice().try_into().map_err(|_| {
                OccupancyError::structural(format!(
                    "ring {} has {} cells, expected {}",
                    ring,
                    row.len(),
                    DIAGONAL_COUNT
                ))
            })?;
        }
        Ok(Self::new(cells))
    }

    pub fn cells(&self) -> &[[u8; DIAGONAL_COUNT]; RING_COUNT] {
        &self.cells
    }

    pub fn get(&self, ring: usize, diagonal: usize) -> u8 {
        self.cells[ring][diagonal]
    }

    pub fn is_occupied(&self, ring: usize, diagonal: usize) -> bool {
        self.cells[ring][diagonal] != 0
    }

    /// Cells of one ring, indexed by diagonal
    pub fn ring(&self, ring: usize) -> [u8; DIAGONAL_COUNT] {
        self.cells[ring]
    }

    /// Cells of one diagonal, indexed by ring
    pub fn diagonal(&self, diagonal: usize) -> [u8; RING_COUNT] {
        [
            self.cells[0][diagonal],
            self.cells[1][diagonal],
            self.cells[2][diagonal],
        ]
    }

    /// Copy with one ring replaced
    pub fn with_ring(&self, ring: usize, cells: [u8; DIAGONAL_COUNT]) -> Self {
        let mut next = *self;
        next.cells[ring] = cells;
        next
    }

    /// Copy with one diagonal replaced
    pub fn with_diagonal(&self, diagonal: usize, cells: [u8; RING_COUNT]) -> Self {
        let mut next = *self;
        for (ring, value) in cells.into_iter().enumerate() {
            next.cells[ring][diagonal] = value;
        }
        next
    }

    /// Sum of all cells (6 for a full placement)
    pub fn total(&self) -> u32 {
        self.cells.iter().flatten().map(|&c| u32::from(c)).sum()
    }

    /// Number of occupied intersections
    pub fn pair_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == PAIR).count()
    }

    /// Occupied `(ring, diagonal)` intersections in scan order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..RING_COUNT)
            .flat_map(|ring| (0..DIAGONAL_COUNT).map(move |diagonal| (ring, diagonal)))
            .filter(|&(ring, diagonal)| self.is_occupied(ring, diagonal))
    }

    /// Check every rule, reporting the first one that fails
    pub fn check(&self) -> Result<(), OccupancyError> {
        for (ring, row) in self.cells.iter().enumerate() {
            for (diagonal, &value) in row.iter().enumerate() {
                if value != 0 && value != PAIR {
                    return Err(OccupancyError::structural(format!(
                        "cell ({}, {}) holds {}; cells must be 0 or 2",
                        ring, diagonal, value
                    )));
                }
            }
        }

        if self.total() != u32::from(TOTAL_PEWS) {
            let pairs = self.pair_count();
            let reason = if pairs < PAIR_COUNT {
                let missing = PAIR_COUNT - pairs;
                format!(
                    "need {} more pair{} (total must be {})",
                    missing,
                    if missing == 1 { "" } else { "s" },
                    PAIR_COUNT
                )
            } else {
                let extra = pairs - PAIR_COUNT;
                format!(
                    "remove {} pair{} (total must be {})",
                    extra,
                    if extra == 1 { "" } else { "s" },
                    PAIR_COUNT
                )
            };
            return Err(OccupancyError::constraint(reason));
        }

        let inner: u8 = self.cells[0].iter().sum();
        if inner > PAIR {
            return Err(OccupancyError::constraint("maximum 1 pair on inner ring"));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Ring sums followed by diagonal sums
    pub fn to_vector(&self) -> OccupancyVector {
        let mut values = [0u8; 6];
        for ring in 0..RING_COUNT {
            for diagonal in 0..DIAGONAL_COUNT {
                let cell = self.cells[ring][diagonal];
                values[ring] += cell;
                values[RING_COUNT + diagonal] += cell;
            }
        }
        OccupancyVector::new(values)
    }

    /// Number of cells that differ from `other`
    pub fn distance(&self, other: &Matrix) -> usize {
        self.cells
            .iter()
            .flatten()
            .zip(other.cells.iter().flatten())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        generate_default_matrix()
    }
}

impl From<[[u8; DIAGONAL_COUNT]; RING_COUNT]> for Matrix {
    fn from(cells: [[u8; DIAGONAL_COUNT]; RING_COUNT]) -> Self {
        Self::new(cells)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        write!(f, "[{}]", rows.join(" / "))
    }
}

/// Validate nested rows as an occupancy matrix
pub fn is_valid_matrix(rows: &[Vec<u8>]) -> bool {
    Matrix::from_rows(rows)
        .map(|m| m.is_valid())
        .unwrap_or(false)
}

/// The starting configuration: every pair on the outer ring
pub fn generate_default_matrix() -> Matrix {
    OUTER_RING_STATE
}

/// Human-readable name of an intersection, e.g. "Outer Ring, Horizontal Diagonal"
///
/// `None` when either index is out of range.
pub fn position_name(ring: usize, diagonal: usize) -> Option<String> {
    let ring = RING_NAMES.get(ring)?;
    let diagonal = DIAGONAL_NAMES.get(diagonal)?;
    Some(format!("{} Ring, {} Diagonal", ring, diagonal))
}
