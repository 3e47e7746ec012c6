//! Answer types for branch-point questions.
//!
//! Eligibility questions are three-valued: an applicant may not have
//! answered yet. `TriState` makes that state explicit instead of hiding it
//! behind a nullable boolean.

use serde::{Deserialize, Serialize};

/// Answer to a yes/no question that may still be unanswered.
///
/// Serialises as JSON `null`, `true` or `false`, so snapshots and payloads
/// keep the nullable-boolean shape the backend expects.
///
/// # Example
///
/// ```rust
/// use membership_wizard::core::TriState;
///
/// let answer = TriState::default();
/// assert!(!answer.is_answered());
///
/// let answer = TriState::from(Some(true));
/// assert!(answer.is_yes());
/// assert_eq!(answer.as_option(), Some(true));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
    #[default]
    Unanswered,
    Yes,
    No,
}

impl TriState {
    /// Whether the question has been answered either way.
    pub fn is_answered(self) -> bool {
        !matches!(self, Self::Unanswered)
    }

    pub fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }

    pub fn is_no(self) -> bool {
        matches!(self, Self::No)
    }

    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Unanswered => None,
            Self::Yes => Some(true),
            Self::No => Some(false),
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unanswered,
            Some(true) => Self::Yes,
            Some(false) => Self::No,
        }
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        value.as_option()
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// The membership category an applicant is applying for.
///
/// This is the primary branch selector for step sequencing. Values that
/// are not recognised deserialize to `Unset`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipType {
    Full,
    Basic,
    Associate,
    RegisteringInterest,
    #[default]
    #[serde(rename = "", other)]
    Unset,
}

impl MembershipType {
    /// Wire value, `""` when unset.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Full => "full",
            Self::Basic => "basic",
            Self::Associate => "associate",
            Self::RegisteringInterest => "registering_interest",
        }
    }

    pub fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}
