//! Pure core of the wizard engine.
//!
//! This module contains the decision logic with no side effects:
//! - Answer and step types
//! - Step sequencing from the current answers
//! - Per-step validation gating
//! - Immutable navigation history
//!
//! Nothing here touches storage or the network, so every function can be
//! tested with plain values.

mod answer;
mod form;
mod gate;
mod history;
mod sequencer;
mod step;

pub use answer::{MembershipType, TriState};
pub use form::{FieldUpdate, FormData};
pub use gate::{can_advance, check_step, is_valid_email, violations, StepViolation, ViolationKind};
pub use history::{Direction, NavigationHistory, StepMove};
pub use sequencer::{sequence, steps};
pub use step::{StepDescriptor, StepId};

