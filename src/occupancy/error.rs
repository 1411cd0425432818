//! Error types for occupancy validation

use thiserror::Error;

/// Reasons a vector or matrix is not a realizable placement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OccupancyError {
    /// Wrong shape, length, or value set; rejected before any combinatorial work
    #[error("malformed occupancy: {reason}")]
    Structural { reason: String },

    /// Well-formed, but the sum or feasibility constraints cannot be met
    #[error("unrealizable occupancy: {reason}")]
    Constraint { reason: String },
}

impl OccupancyError {
    /// Create a structural error
    pub fn structural(reason: impl Into<String>) -> Self {
        Self::Structural {
            reason: reason.into(),
        }
    }

    /// Create a constraint error
    pub fn constraint(reason: impl Into<String>) -> Self {
        Self::Constraint {
            reason: reason.into(),
        }
    }

    /// True for shape/value-set failures
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }

    /// The human-readable reason without the category prefix
    pub fn reason(&self) -> &str {
        match self {
            Self::Structural { reason } | Self::Constraint { reason } => reason,
        }
    }
}
