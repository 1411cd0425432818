//! Occupancy vectors: ring and diagonal marginal counts
//!
//! A vector `(r1, r2, r3, d1, d2, d3)` records how many pews sit on each ring
//! (innermost first) and on each diagonal. Pews always come in symmetric
//! pairs, so every count is even and the six pews give both halves a sum of 6.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::OccupancyError;
use super::matrix::Matrix;
use super::{DIAGONAL_COUNT, PAIR, RING_COUNT, TOTAL_PEWS};

/// Counts allowed on the middle/outer rings and on every diagonal
const AXIS_VALUES: [u8; 4] = [0, 2, 4, 6];

/// Counts allowed on the innermost ring (at most one pair fits)
const INNER_RING_VALUES: [u8; 2] = [0, 2];

/// Vectors known to have more than one arrangement, listed first by the enumerator
pub const MULTIPLY_REALIZABLE: [OccupancyVector; 5] = [
    OccupancyVector::new([2, 2, 2, 2, 2, 2]),
    OccupancyVector::new([0, 2, 4, 2, 2, 2]),
    OccupancyVector::new([0, 4, 2, 2, 2, 2]),
    OccupancyVector::new([2, 0, 4, 2, 2, 2]),
    OccupancyVector::new([2, 4, 0, 2, 2, 2]),
];

/// Ring and diagonal pew counts `(r1, r2, r3, d1, d2, d3)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccupancyVector(pub [u8; 6]);

impl OccupancyVector {
    pub const fn new(values: [u8; 6]) -> Self {
        Self(values)
    }

    /// Build a vector from an arbitrary slice, rejecting the wrong length
    pub fn from_slice(values: &[u8]) -> Result<Self, OccupancyError> {
        let array: [u8; 6] = values.try_into().map_err(|_| {
            OccupancyError::structural(format!("expected 6 values, found {}", values.len()))
        })?;
        Ok(Self(array))
    }

    pub fn values(&self) -> [u8; 6] {
        self.0
    }

    /// Pew counts on the inner, middle, and outer ring
    pub fn rings(&self) -> [u8; RING_COUNT] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Pew counts on diagonals 0, 1, 2
    pub fn diagonals(&self) -> [u8; DIAGONAL_COUNT] {
        [self.0[3], self.0[4], self.0[5]]
    }

    /// Check every rule, reporting the first one that fails
    pub fn check(&self) -> Result<(), OccupancyError> {
        let rings = self.rings();
        let diagonals = self.diagonals();

        if !INNER_RING_VALUES.contains(&rings[0]) {
            return Err(OccupancyError::structural(format!(
                "inner ring holds at most one pair, found {} pews",
                rings[0]
            )));
        }
        for (label, value) in [("r2", rings[1]), ("r3", rings[2])]
            .into_iter()
            .chain([("d1", diagonals[0]), ("d2", diagonals[1]), ("d3", diagonals[2])])
        {
            if !AXIS_VALUES.contains(&value) {
                return Err(OccupancyError::structural(format!(
                    "{} must be one of 0, 2, 4, 6, found {}",
                    label, value
                )));
            }
        }

        let ring_sum: u8 = rings.iter().sum();
        if ring_sum != TOTAL_PEWS {
            return Err(OccupancyError::constraint(format!(
                "ring counts sum to {}, expected {}",
                ring_sum, TOTAL_PEWS
            )));
        }
        let diagonal_sum: u8 = diagonals.iter().sum();
        if diagonal_sum != TOTAL_PEWS {
            return Err(OccupancyError::constraint(format!(
                "diagonal counts sum to {}, expected {}",
                diagonal_sum, TOTAL_PEWS
            )));
        }

        feasible_distribution(rings, diagonals).map(|_| ())
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Every occupancy matrix whose marginals equal this vector, in cell scan order
    ///
    /// Cells are visited ring-major; each branch tries placing a pair before
    /// skipping the cell, so earlier cells are occupied in earlier results.
    pub fn realizations(&self) -> Vec<Matrix> {
        let mut found = Vec::new();
        let mut cells = [[0u8; DIAGONAL_COUNT]; RING_COUNT];
        let mut rings = self.rings();
        let mut diagonals = self.diagonals();
        collect_realizations(0, &mut cells, &mut rings, &mut diagonals, &mut found);
        found
    }
}

impl fmt::Display for OccupancyVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r1, r2, r3, d1, d2, d3] = self.0;
        write!(f, "({}, {}, {}, {}, {}, {})", r1, r2, r3, d1, d2, d3)
    }
}

impl From<[u8; 6]> for OccupancyVector {
    fn from(values: [u8; 6]) -> Self {
        Self(values)
    }
}

/// Validate a raw six-value vector
pub fn is_valid_vector(values: &[u8]) -> bool {
    OccupancyVector::from_slice(values)
        .map(|v| v.is_valid())
        .unwrap_or(false)
}

/// Find a pair distribution over the 3×3 intersections matching the marginals
///
/// Intersections that the pigeonhole bound forces are filled first. The rest
/// is placed pair by pair in (ring, diagonal) scan order, backtracking when a
/// choice leaves a budget that no free intersection can absorb.
fn feasible_distribution(
    rings: [u8; RING_COUNT],
    diagonals: [u8; DIAGONAL_COUNT],
) -> Result<[[u8; DIAGONAL_COUNT]; RING_COUNT], OccupancyError> {
    let mut distribution = [[0u8; DIAGONAL_COUNT]; RING_COUNT];

    for ring in 0..RING_COUNT {
        for diagonal in 0..DIAGONAL_COUNT {
            let required = (rings[ring] + diagonals[diagonal]).saturating_sub(TOTAL_PEWS);
            if required > PAIR {
                return Err(OccupancyError::constraint(format!(
                    "ring {} and diagonal {} would need {} pews at one intersection",
                    ring, diagonal, required
                )));
            }
            distribution[ring][diagonal] = required;
        }
    }

    // Forced placements never exceed a budget: each ring's forced total is at most its count.
    let mut ring_budget = rings;
    let mut diagonal_budget = diagonals;
    for ring in 0..RING_COUNT {
        for diagonal in 0..DIAGONAL_COUNT {
            ring_budget[ring] -= distribution[ring][diagonal];
            diagonal_budget[diagonal] -= distribution[ring][diagonal];
        }
    }

    if place_remaining(&mut distribution, &mut ring_budget, &mut diagonal_budget) {
        Ok(distribution)
    } else {
        Err(OccupancyError::constraint(
            "no placement of pairs satisfies both ring and diagonal counts",
        ))
    }
}

fn place_remaining(
    distribution: &mut [[u8; DIAGONAL_COUNT]; RING_COUNT],
    rings: &mut [u8; RING_COUNT],
    diagonals: &mut [u8; DIAGONAL_COUNT],
) -> bool {
    if rings.iter().all(|&r| r == 0) && diagonals.iter().all(|&d| d == 0) {
        return true;
    }

    for ring in 0..RING_COUNT {
        if rings[ring] < PAIR {
            continue;
        }
        for diagonal in 0..DIAGONAL_COUNT {
            if diagonals[diagonal] < PAIR || distribution[ring][diagonal] >= PAIR {
                continue;
            }

            distribution[ring][diagonal] += PAIR;
            rings[ring] -= PAIR;
            diagonals[diagonal] -= PAIR;

            if place_remaining(distribution, rings, diagonals) {
                return true;
            }

            distribution[ring][diagonal] -= PAIR;
            rings[ring] += PAIR;
            diagonals[diagonal] += PAIR;
        }
    }
    false
}

fn collect_realizations(
    index: usize,
    cells: &mut [[u8; DIAGONAL_COUNT]; RING_COUNT],
    rings: &mut [u8; RING_COUNT],
    diagonals: &mut [u8; DIAGONAL_COUNT],
    found: &mut Vec<Matrix>,
) {
    if rings.iter().all(|&r| r == 0) && diagonals.iter().all(|&d| d == 0) {
        found.push(Matrix::new(*cells));
        return;
    }
    if index == RING_COUNT * DIAGONAL_COUNT {
        return;
    }

    let ring = index / DIAGONAL_COUNT;
    let diagonal = index % DIAGONAL_COUNT;

    if rings[ring] >= PAIR && diagonals[diagonal] >= PAIR {
        cells[ring][diagonal] = PAIR;
        rings[ring] -= PAIR;
        diagonals[diagonal] -= PAIR;

        collect_realizations(index + 1, cells, rings, diagonals, found);

        cells[ring][diagonal] = 0;
        rings[ring] += PAIR;
        diagonals[diagonal] += PAIR;
    }

    collect_realizations(index + 1, cells, rings, diagonals, found);
}

/// `6 - a - b` when it is an allowed axis count
fn complement(a: u8, b: u8) -> Option<u8> {
    TOTAL_PEWS
        .checked_sub(a + b)
        .filter(|rest| AXIS_VALUES.contains(rest))
}

/// Every valid vector: the known multiply realizable ones first, then the
/// rest in generation order
pub fn generate_all_valid_vectors() -> Vec<OccupancyVector> {
    let mut generated = Vec::new();

    for r1 in INNER_RING_VALUES {
        for r2 in AXIS_VALUES {
            let Some(r3) = complement(r1, r2) else {
                continue;
            };
            for d1 in AXIS_VALUES {
                for d2 in AXIS_VALUES {
                    let Some(d3) = complement(d1, d2) else {
                        continue;
                    };
                    let vector = OccupancyVector::new([r1, r2, r3, d1, d2, d3]);
                    if vector.is_valid() {
                        generated.push(vector);
                    }
                }
            }
        }
    }

    let mut all = MULTIPLY_REALIZABLE.to_vec();
    all.extend(
        generated
            .into_iter()
            .filter(|v| !MULTIPLY_REALIZABLE.contains(v)),
    );
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_vector_is_valid() {
        assert!(is_valid_vector(&[2, 2, 2, 2, 2, 2]));
    }

    #[test]
    fn test_outer_ring_vector_is_valid() {
        assert!(is_valid_vector(&[0, 0, 6, 2, 2, 2]));
    }

    #[test]
    fn test_inner_ring_overflow_is_structural() {
        let err = OccupancyVector::new([6, 0, 0, 2, 2, 2]).check().unwrap_err();
        assert!(err.is_structural());
        assert!(!is_valid_vector(&[6, 0, 0, 2, 2, 2]));
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(!is_valid_vector(&[2, 2, 2, 2, 2]));
        assert!(!is_valid_vector(&[2, 2, 2, 2, 2, 2, 0]));
        let err = OccupancyVector::from_slice(&[]).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_odd_count_is_structural() {
        let err = OccupancyVector::new([0, 3, 3, 2, 2, 2]).check().unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_sum_mismatch_is_constraint() {
        let err = OccupancyVector::new([2, 2, 4, 2, 2, 2]).check().unwrap_err();
        assert!(!err.is_structural());
        assert!(err.reason().contains("ring counts sum to 8"));
    }

    #[test]
    fn test_pigeonhole_rejects_crowded_intersection() {
        // All six pews on the middle ring and all six on diagonal 0
        let err = OccupancyVector::new([0, 6, 0, 6, 0, 0]).check().unwrap_err();
        assert!(err.reason().contains("ring 1 and diagonal 0"));
    }

    #[test]
    fn test_backtracking_finds_non_first_fit_placement() {
        // First-fit places ring 1 on diagonal 1 and strands the outer ring
        assert!(is_valid_vector(&[0, 2, 4, 0, 2, 4]));
        let realizations = OccupancyVector::new([0, 2, 4, 0, 2, 4]).realizations();
        assert_eq!(realizations.len(), 1);
        assert_eq!(
            realizations[0],
            Matrix::new([[0, 0, 0], [0, 0, 2], [0, 2, 2]])
        );
    }

    #[test]
    fn test_realizations_of_uniform_vector() {
        let realizations = OccupancyVector::new([2, 2, 2, 2, 2, 2]).realizations();
        assert_eq!(realizations.len(), 6);
        assert_eq!(
            realizations[0],
            Matrix::new([[2, 0, 0], [0, 2, 0], [0, 0, 2]])
        );
    }

    #[test]
    fn test_generate_puts_multiply_realizable_first() {
        let all = generate_all_valid_vectors();
        assert_eq!(&all[..5], &MULTIPLY_REALIZABLE[..]);
        assert_eq!(all[5], OccupancyVector::new([0, 0, 6, 2, 2, 2]));
        assert_eq!(all.len(), 40);
    }

    #[test]
    fn test_generate_has_no_duplicates() {
        let all = generate_all_valid_vectors();
        let mut sorted = all.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), all.len());
    }

    #[test]
    fn test_display() {
        let v = OccupancyVector::new([0, 2, 4, 2, 2, 2]);
        assert_eq!(v.to_string(), "(0, 2, 4, 2, 2, 2)");
    }
}
