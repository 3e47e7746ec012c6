//! Step catalogue for the application wizard.
//!
//! Every step the wizard can show is a `StepId`. The declaration order of
//! the variants is the catalogue order, and every sequenced path is an
//! ordered subsequence of it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a wizard step.
///
/// Serialises as the kebab-case id used by the UI (`"eligibility-1"`,
/// `"association-details"`, ...).
///
/// # Example
///
/// ```rust
/// use membership_wizard::core::StepId;
///
/// assert_eq!(StepId::Eligibility1.name(), "eligibility-1");
/// assert!(StepId::Submit.is_final());
/// assert!(StepId::Email.ordinal() < StepId::Submit.ordinal());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepId {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "basic-info")]
    BasicInfo,
    #[serde(rename = "eligibility-1")]
    Eligibility1,
    #[serde(rename = "eligibility-2")]
    Eligibility2,
    #[serde(rename = "eligibility-3")]
    Eligibility3,
    #[serde(rename = "association-details")]
    AssociationDetails,
    #[serde(rename = "membership-contribution")]
    MembershipContribution,
    #[serde(rename = "register-interest")]
    RegisterInterest,
    #[serde(rename = "key-issues")]
    KeyIssues,
    #[serde(rename = "submit")]
    Submit,
}

impl StepId {
    /// All steps in catalogue order.
    pub const ALL: [StepId; 10] = [
        StepId::Email,
        StepId::BasicInfo,
        StepId::Eligibility1,
        StepId::Eligibility2,
        StepId::Eligibility3,
        StepId::AssociationDetails,
        StepId::MembershipContribution,
        StepId::RegisterInterest,
        StepId::KeyIssues,
        StepId::Submit,
    ];

    /// The step's id as shown to the UI layer.
    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::BasicInfo => "basic-info",
            Self::Eligibility1 => "eligibility-1",
            Self::Eligibility2 => "eligibility-2",
            Self::Eligibility3 => "eligibility-3",
            Self::AssociationDetails => "association-details",
            Self::MembershipContribution => "membership-contribution",
            Self::RegisterInterest => "register-interest",
            Self::KeyIssues => "key-issues",
            Self::Submit => "submit",
        }
    }

    /// Look a step up by its id.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.name() == name)
    }

    /// Position in the catalogue.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// The submission step terminates every complete path.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Submit)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Email => "Email Address",
            Self::BasicInfo => "Basic Information",
            Self::Eligibility1 => "Eligibility",
            Self::Eligibility2 => "Eligibility",
            Self::Eligibility3 => "Eligibility",
            Self::AssociationDetails => "Association Details",
            Self::MembershipContribution => "Membership Contribution",
            Self::RegisterInterest => "Register Interest",
            Self::KeyIssues => "Key Issues",
            Self::Submit => "Review & Submit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Email => "Enter the email address we should use to contact you",
            Self::BasicInfo => "Tell us about your organisation and the membership you want",
            Self::Eligibility1 => "Is your organisation an association?",
            Self::Eligibility2 => "Is your association formally registered?",
            Self::Eligibility3 => "Does your association represent women in trade?",
            Self::AssociationDetails => {
                "Registration, representative and leadership details for your association"
            }
            Self::MembershipContribution => "How membership contributions work",
            Self::RegisterInterest => "Register your interest and choose how you will pay",
            Self::KeyIssues => "The issues that matter most to your members",
            Self::Submit => "Review your answers and confirm consent to submit",
        }
    }

    pub fn descriptor(self) -> StepDescriptor {
        StepDescriptor {
            id: self,
            title: self.title().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Presentation data for one step of the sequenced path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescriptor {
    pub id: StepId,
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for step in StepId::ALL {
            assert_eq!(StepId::from_name(step.name()), Some(step));
        }
        assert_eq!(StepId::from_name("payment"), None);
    }

    #[test]
    fn serde_uses_kebab_case_ids() {
        let json = serde_json::to_string(&StepId::AssociationDetails).unwrap();
        assert_eq!(json, "\"association-details\"");

        let parsed: StepId = serde_json::from_str("\"eligibility-3\"").unwrap();
        assert_eq!(parsed, StepId::Eligibility3);
    }

    #[test]
    fn ordinals_follow_catalogue_order() {
        for (i, step) in StepId::ALL.iter().enumerate() {
            assert_eq!(step.ordinal(), i);
        }
    }

    #[test]
    fn only_submit_is_final() {
        let finals: Vec<_> = StepId::ALL.into_iter().filter(|s| s.is_final()).collect();
        assert_eq!(finals, vec![StepId::Submit]);
    }

    #[test]
    fn descriptor_carries_title_and_description() {
        let descriptor = StepId::KeyIssues.descriptor();
        assert_eq!(descriptor.id, StepId::KeyIssues);
        assert_eq!(descriptor.title, "Key Issues");
        assert!(!descriptor.description.is_empty());
    }
}
