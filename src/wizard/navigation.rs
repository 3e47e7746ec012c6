//! Navigation outcomes.

use crate::core::{StepId, StepViolation};
use serde::{Deserialize, Serialize};

/// Result of asking the wizard to move.
///
/// A blocked move is an ordinary value: the gate failing is expected
/// while the applicant fills in a step.
#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    /// Moved to this step
    Moved(StepId),

    /// A step on the way does not pass its gate
    Blocked {
        step: StepId,
        violations: Vec<StepViolation>,
    },

    /// Already on the last step of the current path
    AtEnd,

    /// The requested step is not on the current path
    Unavailable(StepId),
}

impl Advance {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// Position for progress display, derived from the current path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// One-based position of the current step
    pub position: usize,
    /// Number of steps on the current path
    pub total: usize,
}

impl Progress {
    /// Completed share of the path in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_moved_counts_as_moved() {
        assert!(Advance::Moved(StepId::BasicInfo).is_moved());
        assert!(!Advance::AtEnd.is_moved());
        assert!(!Advance::Unavailable(StepId::Submit).is_moved());
    }

    #[test]
    fn fraction_reflects_position() {
        let progress = Progress {
            position: 2,
            total: 8,
        };
        assert_eq!(progress.fraction(), 0.25);

        let empty = Progress {
            position: 0,
            total: 0,
        };
        assert_eq!(empty.fraction(), 0.0);
    }
}
