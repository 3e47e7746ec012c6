//! The wizard engine.
//!
//! Ties the pure core to its environment: the draft store, the persistence
//! adapter and the submission API.
//!
//! # Control flow
//!
//! - The UI writes answers through `update_field`/`update_fields`
//! - The step path is recomputed from the answers on every access
//! - `next` consults the gate before moving forward
//! - `submit` maps the draft, calls the API, and clears the draft on success

mod machine;
mod navigation;

pub use machine::Wizard;
pub use navigation::{Advance, Progress};
