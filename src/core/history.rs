//! Navigation history tracking.
//!
//! Records every move between wizard steps as an immutable value. Used for
//! diagnostics only; the wizard's position never depends on it.

use super::step::StepId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which way a move went through the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    /// Position re-resolved after an answer changed the path.
    Snapped,
}

/// Record of a single move between steps.
///
/// # Example
///
/// ```rust
/// use membership_wizard::core::{Direction, StepId, StepMove};
/// use chrono::Utc;
///
/// let step_move = StepMove {
///     from: StepId::Email,
///     to: StepId::BasicInfo,
///     direction: Direction::Forward,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(step_move.to, StepId::BasicInfo);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepMove {
    pub from: StepId,
    pub to: StepId,
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of step moves.
///
/// History is immutable - `record` returns a new history with the move
/// appended.
///
/// # Example
///
/// ```rust
/// use membership_wizard::core::{Direction, NavigationHistory, StepId, StepMove};
/// use chrono::Utc;
///
/// let history = NavigationHistory::new();
/// let history = history.record(StepMove {
///     from: StepId::Email,
///     to: StepId::BasicInfo,
///     direction: Direction::Forward,
///     timestamp: Utc::now(),
/// });
/// let history = history.record(StepMove {
///     from: StepId::BasicInfo,
///     to: StepId::Email,
///     direction: Direction::Backward,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(
///     history.get_path(),
///     vec![&StepId::Email, &StepId::BasicInfo, &StepId::Email]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationHistory {
    moves: Vec<StepMove>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }

    /// Record a move, returning a new history. The receiver is unchanged.
    pub fn record(&self, step_move: StepMove) -> Self {
        let mut moves = self.moves.clone();
        moves.push(step_move);
        Self { moves }
    }

    /// Steps visited in order: the first origin, then every destination.
    pub fn get_path(&self) -> Vec<&StepId> {
        let mut path = Vec::new();
        if let Some(first) = self.moves.first() {
            path.push(&first.from);
        }
        for step_move in &self.moves {
            path.push(&step_move.to);
        }
        path
    }

    /// Time between the first and last recorded move.
    ///
    /// Returns `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.moves.first(), self.moves.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    /// Number of moves in `direction`.
    pub fn count(&self, direction: Direction) -> usize {
        self.moves
            .iter()
            .filter(|m| m.direction == direction)
            .count()
    }

    pub fn moves(&self) -> &[StepMove] {
        &self.moves
    }
}
