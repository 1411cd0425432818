//! Parsed notation values

use serde::{Deserialize, Serialize};

use crate::occupancy::{Matrix, OccupancyError, OccupancyVector};

/// Either form of occupancy a user can write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    /// `(r0, r1, r2, d0, d1, d2)`
    Vector(OccupancyVector),
    /// `[r0 / r1 / r2]`, one row per ring
    Matrix(Matrix),
}

impl Occupancy {
    /// Validate against the placement rules
    pub fn check(&self) -> Result<(), OccupancyError> {
        match self {
            Occupancy::Vector(v) => v.check(),
            Occupancy::Matrix(m) => m.check(),
        }
    }

    /// The vector form; matrices are reduced to their ring and diagonal sums
    pub fn to_vector(&self) -> OccupancyVector {
        match self {
            Occupancy::Vector(v) => *v,
            Occupancy::Matrix(m) => m.to_vector(),
        }
    }
}

impl std::fmt::Display for Occupancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Occupancy::Vector(v) => write!(f, "{}", v),
            Occupancy::Matrix(m) => write!(f, "{}", m),
        }
    }
}
