//! Search state shared by the strategies of one planning call

use serde::{Deserialize, Serialize};

use crate::occupancy::RING_COUNT;

/// Rotation sense of a ring, as seen on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    Clockwise,
    Counterclockwise,
}

impl RotationDirection {
    /// Signed angle of one step, in degrees
    pub fn step_degrees(&self) -> i32 {
        match self {
            Self::Clockwise => 60,
            Self::Counterclockwise => -60,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clockwise => "clockwise",
            Self::Counterclockwise => "counterclockwise",
        }
    }
}

impl std::fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state threaded through move generation
///
/// Once a ring has rotated one way, later moves only rotate it the same way,
/// so an animated sequence never reverses a ring's spin mid-path. The
/// commitments live for one planning call; strategies tried after a failed
/// one inherit whatever it committed.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    ring_directions: [Option<RotationDirection>; RING_COUNT],
    expanded: usize,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a ring already committed to a direction
    pub fn with_direction(mut self, ring: usize, direction: RotationDirection) -> Self {
        self.ring_directions[ring] = Some(direction);
        self
    }

    /// Forget all commitments and counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn direction(&self, ring: usize) -> Option<RotationDirection> {
        self.ring_directions[ring]
    }

    /// Whether a rotation of `ring` in `direction` is still allowed, committing
    /// the direction if the ring has none yet
    pub fn admit_rotation(&mut self, ring: usize, direction: RotationDirection) -> bool {
        match self.ring_directions[ring] {
            Some(committed) => committed == direction,
            None => {
                tracing::trace!(ring, %direction, "ring direction committed");
                self.ring_directions[ring] = Some(direction);
                true
            }
        }
    }

    pub(crate) fn record_expansion(&mut self) {
        self.expanded += 1;
    }

    /// Number of states whose moves have been generated
    pub fn expanded(&self) -> usize {
        self.expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_rotation_commits() {
        let mut ctx = SearchContext::new();
        assert_eq!(ctx.direction(1), None);
        assert!(ctx.admit_rotation(1, RotationDirection::Clockwise));
        assert!(!ctx.admit_rotation(1, RotationDirection::Counterclockwise));
        assert!(ctx.admit_rotation(1, RotationDirection::Clockwise));
        assert_eq!(ctx.direction(1), Some(RotationDirection::Clockwise));
        assert_eq!(ctx.direction(0), None);
    }

    #[test]
    fn test_reset_clears_commitments() {
        let mut ctx = SearchContext::new().with_direction(2, RotationDirection::Counterclockwise);
        ctx.record_expansion();
        ctx.reset();
        assert_eq!(ctx.direction(2), None);
        assert_eq!(ctx.expanded(), 0);
    }

    #[test]
    fn test_step_degrees() {
        assert_eq!(RotationDirection::Clockwise.step_degrees(), 60);
        assert_eq!(RotationDirection::Counterclockwise.step_degrees(), -60);
    }
}
