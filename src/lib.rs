//! Membership Wizard: a data-driven application wizard engine
//!
//! The engine decides which steps a membership applicant must traverse,
//! gates forward navigation on per-step validity, keeps the draft across
//! reloads and maps the completed draft onto a submission payload.
//!
//! It follows a "pure core, imperative shell" layout. The core (step
//! sequencing, gating, history) is made of pure functions over the answer
//! record; storage and the network live at the edges.
//!
//! # Core Concepts
//!
//! - **FormData**: Flat record of applicant answers, with explicit
//!   three-valued answers for branch-point questions
//! - **Sequencer**: Recomputes the step path from the current answers
//! - **Gate**: Pure per-step predicate deciding whether the applicant may move on
//! - **Wizard**: Holds the position as a step id and re-resolves it when the
//!   path changes shape
//!
//! # Example
//!
//! ```rust
//! use membership_wizard::checkpoint::MemoryStorage;
//! use membership_wizard::core::{FieldUpdate, MembershipType, StepId};
//! use membership_wizard::wizard::{Advance, Wizard};
//!
//! let mut wizard = Wizard::new(MemoryStorage::new());
//! assert!(!wizard.can_advance());
//!
//! wizard.update_field(FieldUpdate::Email("applicant@example.org".to_string()));
//! assert_eq!(wizard.next(), Advance::Moved(StepId::BasicInfo));
//!
//! wizard.update_field(FieldUpdate::MembershipType(MembershipType::Associate));
//! assert_eq!(
//!     wizard.step_ids(),
//!     vec![StepId::Email, StepId::BasicInfo, StepId::Submit]
//! );
//! ```

pub mod macros;

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod draft;
pub mod submission;
pub mod wizard;

// Re-export commonly used types
pub use config::WizardConfig;
pub use crate::core::{FieldUpdate, FormData, MembershipType, StepId, TriState};
pub use draft::DraftStore;
pub use wizard::{Advance, Wizard};
