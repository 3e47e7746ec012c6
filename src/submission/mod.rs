//! Submission of a completed draft.
//!
//! This is the imperative shell around the pure core: it maps answers to
//! the backend's payload and performs the only suspending operation in the
//! engine, the network call.

mod client;
mod error;
mod payload;

pub use client::{interpret_response, ApplicationApi, HttpApplicationApi, SubmissionReceipt};
pub use error::{FieldError, SubmissionError};
pub use payload::ApplicationPayload;

#[cfg(test)]
pub use client::MockApplicationApi;
