//! Occupancy model: vectors, matrices, and the arrangements they describe
//!
//! The hexagon is cut by 3 concentric rings and 3 diagonals into 9
//! intersections. Six pews are placed as 3 symmetric pairs, at most one pair
//! per intersection and at most one pair on the innermost ring.

pub mod arrangement;
pub mod error;
pub mod matrix;
pub mod vector;

pub use arrangement::{find_all_arrangements, Arrangement, Placement};
pub use error::OccupancyError;
pub use matrix::{
    generate_default_matrix, is_valid_matrix, position_name, Matrix, OUTER_RING_STATE,
};
pub use vector::{generate_all_valid_vectors, is_valid_vector, OccupancyVector, MULTIPLY_REALIZABLE};

pub const RING_COUNT: usize = 3;
pub const DIAGONAL_COUNT: usize = 3;

/// Pews in one symmetric pair, and the value of an occupied matrix cell
pub const PAIR: u8 = 2;

/// Pews placed in every configuration
pub const TOTAL_PEWS: u8 = 6;

/// Pairs placed in every configuration
pub const PAIR_COUNT: usize = 3;
