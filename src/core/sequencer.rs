//! Step sequencing: which steps an applicant must traverse.
//!
//! The path is a pure function of the answers given so far. It is
//! recomputed on every access and never cached, so changing an earlier
//! answer immediately prunes or extends the remaining path.

use super::answer::{MembershipType, TriState};
use super::form::FormData;
use super::step::{StepDescriptor, StepId};

const BASE: [StepId; 2] = [StepId::Email, StepId::BasicInfo];
const INTEREST_TAIL: [StepId; 3] = [StepId::RegisterInterest, StepId::KeyIssues, StepId::Submit];

/// Compute the ordered step path for the current answers.
///
/// The path always starts with `email, basic-info`. It ends with `submit`
/// only once every branch point on the applicant's path is answered; an
/// unanswered eligibility question ends the path at that question.
///
/// # Example
///
/// ```rust
/// use membership_wizard::core::{sequence, FormData, MembershipType, StepId};
///
/// let form = FormData {
///     membership_type: MembershipType::Associate,
///     ..Default::default()
/// };
///
/// assert_eq!(
///     sequence(&form),
///     vec![StepId::Email, StepId::BasicInfo, StepId::Submit]
/// );
/// ```
pub fn sequence(form: &FormData) -> Vec<StepId> {
    let mut steps = BASE.to_vec();

    match form.membership_type {
        MembershipType::Associate => steps.push(StepId::Submit),
        MembershipType::RegisteringInterest => steps.extend(INTEREST_TAIL),
        MembershipType::Full | MembershipType::Basic => {
            steps.extend(eligibility_path(form));
        }
        MembershipType::Unset => {}
    }

    steps
}

/// The eligibility chain for full and basic applicants.
fn eligibility_path(form: &FormData) -> Vec<StepId> {
    let mut steps = vec![StepId::Eligibility1];

    let chain = [
        (form.is_association, StepId::Eligibility2),
        (form.is_registered, StepId::Eligibility3),
    ];
    for (answer, next_question) in chain {
        match answer {
            TriState::Unanswered => return steps,
            TriState::No => {
                steps.extend(INTEREST_TAIL);
                return steps;
            }
            TriState::Yes => steps.push(next_question),
        }
    }

    match form.represents_women_in_trade {
        TriState::Unanswered => {}
        TriState::No => steps.extend(INTEREST_TAIL),
        TriState::Yes => {
            steps.push(StepId::AssociationDetails);
            steps.push(StepId::MembershipContribution);
            steps.extend(INTEREST_TAIL);
        }
    }

    steps
}

/// Sequence the path and attach titles and descriptions.
pub fn steps(form: &FormData) -> Vec<StepDescriptor> {
    sequence(form).into_iter().map(StepId::descriptor).collect()
}
