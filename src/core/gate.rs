//! Per-step validation gating forward navigation.
//!
//! The gate is a pure predicate over `(step, answers)`. It never mutates
//! state and never blocks backward navigation. `check_step` accumulates
//! every problem on a step using Stillwater's `Validation`, so the UI can
//! highlight all missing fields at once; `can_advance` collapses that to a
//! boolean.

use super::answer::TriState;
use super::form::{is_filled, FormData};
use super::step::StepId;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Why a field keeps a step from being passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// Required text left empty or whitespace-only.
    Missing,
    /// Present but not shaped like an email address.
    InvalidEmail,
    /// A yes/no question that has not been answered.
    Unanswered,
    /// Consent to data processing not given.
    ConsentRequired,
}

/// One problem preventing the applicant from leaving a step.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {kind}")]
pub struct StepViolation {
    /// UI field name (camelCase).
    pub field: &'static str,
    pub kind: ViolationKind,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Missing => "is required",
            Self::InvalidEmail => "must be a valid email address",
            Self::Unanswered => "must be answered",
            Self::ConsentRequired => "consent is required",
        };
        f.write_str(text)
    }
}

type StepCheck = Validation<(), NonEmptyVec<StepViolation>>;

fn ok() -> StepCheck {
    Validation::success(())
}

fn violation(field: &'static str, kind: ViolationKind) -> StepCheck {
    Validation::fail(StepViolation { field, kind })
}

fn required(field: &'static str, value: &str) -> StepCheck {
    if is_filled(value) {
        ok()
    } else {
        violation(field, ViolationKind::Missing)
    }
}

fn answered(field: &'static str, value: TriState) -> StepCheck {
    if value.is_answered() {
        ok()
    } else {
        violation(field, ViolationKind::Unanswered)
    }
}

/// Whether `value` looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// Check every rule for `step`, accumulating all violations.
///
/// # Example
///
/// ```rust
/// use membership_wizard::core::{check_step, FormData, StepId};
/// use stillwater::validation::Validation;
///
/// let form = FormData {
///     organisation_name: "Harbour Traders".to_string(),
///     ..Default::default()
/// };
///
/// match check_step(StepId::BasicInfo, &form) {
///     Validation::Failure(violations) => assert_eq!(violations.len(), 4),
///     Validation::Success(_) => panic!("basic info is incomplete"),
/// }
/// ```
pub fn check_step(step: StepId, form: &FormData) -> StepCheck {
    let checks: Vec<StepCheck> = match step {
        StepId::Email => {
            if !is_filled(&form.email) {
                vec![violation("email", ViolationKind::Missing)]
            } else if !is_valid_email(&form.email) {
                vec![violation("email", ViolationKind::InvalidEmail)]
            } else {
                vec![ok()]
            }
        }
        StepId::BasicInfo => vec![
            required("organisationName", &form.organisation_name),
            required("county", &form.county),
            required("telephone", &form.telephone),
            required("emailAddress", &form.email_address),
            required("membershipType", form.membership_type.as_str()),
        ],
        StepId::Eligibility1 => vec![answered("isAssociation", form.is_association)],
        StepId::Eligibility2 => vec![answered("isRegistered", form.is_registered)],
        StepId::Eligibility3 => vec![answered(
            "representsWomenInTrade",
            form.represents_women_in_trade,
        )],
        StepId::AssociationDetails => vec![
            required("registrationType", &form.registration_type),
            required("organisationDescription", &form.organisation_description),
            required("representativeName", &form.representative_name),
            required("representativeEmail", &form.representative_email),
        ],
        StepId::MembershipContribution | StepId::KeyIssues => vec![ok()],
        StepId::RegisterInterest => match form.register_interest {
            TriState::Unanswered => vec![violation("registerInterest", ViolationKind::Unanswered)],
            TriState::No => vec![ok()],
            TriState::Yes => vec![
                required("paymentMode", &form.payment_mode),
                required("paymentReference", &form.payment_reference),
            ],
        },
        StepId::Submit => {
            if form.data_consent {
                vec![ok()]
            } else {
                vec![violation("dataConsent", ViolationKind::ConsentRequired)]
            }
        }
    };

    Validation::all_vec(checks).map(|_| ())
}

/// Whether the applicant may move forward from `step`.
pub fn can_advance(step: StepId, form: &FormData) -> bool {
    check_step(step, form).is_success()
}

/// Flatten a failed check into a list, empty when the step passes.
pub fn violations(step: StepId, form: &FormData) -> Vec<StepViolation> {
    match check_step(step, form) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}
