//! Pew Arrangements - placement rules and move planning for pews in a hexagonal church
//!
//! Six pews sit as three symmetric pairs on the intersections of three
//! concentric rings and three diagonals. This library validates occupancy
//! vectors and matrices, enumerates the physical arrangements behind a
//! vector, and plans animated move sequences between matrices.
//!
//! # Example
//!
//! ```rust
//! use pew_arrangements::{calculate_transition, parse_matrix, Matrix};
//!
//! let start = Matrix::default();
//! let end = parse_matrix("[0 0 0 / 2 0 0 / 0 2 2]").unwrap();
//! let steps = calculate_transition(&start, &end);
//! assert_eq!(steps.len(), 2);
//! assert_eq!(steps[1].matrix, end);
//! ```

pub mod error;
pub mod notation;
pub mod occupancy;
pub mod planner;

pub use error::ParseError;
pub use notation::{parse, parse_matrix, parse_vector, Occupancy};
pub use occupancy::{
    find_all_arrangements, generate_all_valid_vectors, generate_default_matrix, is_valid_matrix,
    is_valid_vector, position_name, Arrangement, Matrix, OccupancyError, OccupancyVector,
    Placement,
};
pub use planner::{
    calculate_transition, Outcome, Planner, PlannerConfig, Step, Strategy, Transition,
};

use thiserror::Error;

/// Errors from reading and validating user input
#[derive(Debug, Error)]
pub enum InputError {
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    #[error("{0}")]
    Occupancy(#[from] OccupancyError),
}

impl From<Vec<ParseError>> for InputError {
    fn from(errors: Vec<ParseError>) -> Self {
        InputError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a vector or matrix and check it against the placement rules
///
/// # Example
///
/// ```rust
/// use pew_arrangements::{check, InputError};
///
/// assert!(check("(0, 0, 6, 2, 2, 2)").is_ok());
/// assert!(matches!(check("[2 2 0 / 0 0 0 / 2 0 0]"), Err(InputError::Occupancy(_))));
/// ```
pub fn check(source: &str) -> Result<Occupancy, InputError> {
    let occupancy = parse(source)?;
    occupancy.check()?;
    Ok(occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_valid_matrix() {
        let occupancy = check("[2 0 0 / 0 2 0 / 0 0 2]").unwrap();
        assert_eq!(
            occupancy.to_vector(),
            OccupancyVector::new([2, 2, 2, 2, 2, 2])
        );
    }

    #[test]
    fn test_check_parse_error() {
        let err = check("(2, 2").unwrap_err();
        assert!(matches!(err, InputError::Parse(_)));
        assert!(err.to_string().starts_with("parse errors:"));
    }

    #[test]
    fn test_check_rule_violation() {
        let err = check("(0, 0, 6, 6, 0, 0)").unwrap_err();
        assert!(matches!(err, InputError::Occupancy(_)));
    }
}
