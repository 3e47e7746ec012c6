//! The applicant's answer record.

use super::answer::{MembershipType, TriState};
use serde::{Deserialize, Serialize};

crate::form_fields! {
    /// Flat record of applicant answers.
    ///
    /// Created empty, filled in field by field as the applicant moves
    /// through the wizard, and cleared on successful submission. Missing
    /// keys deserialize to their defaults so older snapshots still restore.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct FormData, update FieldUpdate {
        /// Contact email captured on the first step.
        email: String => Email,
        membership_type: MembershipType => MembershipType,

        organisation_name: String => OrganisationName,
        county: String => County,
        telephone: String => Telephone,
        email_address: String => EmailAddress,
        website: String => Website,
        address_line1: String => AddressLine1,
        address_line2: String => AddressLine2,
        town: String => Town,
        eircode: String => Eircode,

        is_association: TriState => IsAssociation,
        is_registered: TriState => IsRegistered,
        represents_women_in_trade: TriState => RepresentsWomenInTrade,

        registration_type: String => RegistrationType,
        registration_number: String => RegistrationNumber,
        organisation_description: String => OrganisationDescription,
        /// Free text; parsed as an integer when the payload is built.
        total_members: String => TotalMembers,
        representative_name: String => RepresentativeName,
        representative_email: String => RepresentativeEmail,
        representative_phone: String => RepresentativePhone,
        chairperson_name: String => ChairpersonName,
        secretary_name: String => SecretaryName,
        sectors: Option<Vec<String>> => Sectors,
        contributions: Option<Vec<String>> => Contributions,

        register_interest: TriState => RegisterInterest,
        payment_mode: String => PaymentMode,
        payment_reference: String => PaymentReference,

        key_issues: String => KeyIssues,
        additional_comments: String => AdditionalComments,
        referral_source: Option<Vec<String>> => ReferralSource,
        referral_other: String => ReferralOther,

        data_consent: bool => DataConsent,
    }
}

impl FormData {
    /// Whether the record is still in its empty default state.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// True when the value contains something other than whitespace.
pub(crate) fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}
