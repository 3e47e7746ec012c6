//! Mapping a completed draft onto the backend's request shape.

use crate::core::{FormData, TriState};
use serde::{Deserialize, Serialize};

/// Request body for creating an application.
///
/// Optional text is `None` rather than an empty string whenever the
/// applicant left it blank or whitespace-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub email: String,
    pub membership_type: String,

    pub organisation_name: String,
    pub county: String,
    pub telephone: String,
    pub email_address: String,
    pub website: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub town: Option<String>,
    pub eircode: Option<String>,

    pub is_association: Option<bool>,
    pub is_registered: Option<bool>,
    pub represents_women_in_trade: Option<bool>,

    pub registration_type: Option<String>,
    pub registration_number: Option<String>,
    pub organisation_description: Option<String>,
    pub total_members: Option<i64>,
    pub representative_name: Option<String>,
    pub representative_email: Option<String>,
    pub representative_phone: Option<String>,
    pub chairperson_name: Option<String>,
    pub secretary_name: Option<String>,
    pub sectors: Option<Vec<String>>,
    pub contributions: Option<Vec<String>>,

    pub register_interest: Option<bool>,
    pub payment_mode: Option<String>,
    pub payment_reference: Option<String>,

    pub key_issues: Option<String>,
    pub additional_comments: Option<String>,
    pub referral_source: Option<Vec<String>>,
    pub referral_other: Option<String>,

    pub data_consent: bool,
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn answer(value: TriState) -> Option<bool> {
    value.as_option()
}

impl ApplicationPayload {
    /// Build the request body from the applicant's answers.
    pub fn from_form(form: &FormData) -> Self {
        Self {
            email: trimmed(&form.email),
            membership_type: form.membership_type.as_str().to_string(),

            organisation_name: trimmed(&form.organisation_name),
            county: trimmed(&form.county),
            telephone: trimmed(&form.telephone),
            email_address: trimmed(&form.email_address),
            website: optional(&form.website),
            address_line1: optional(&form.address_line1),
            address_line2: optional(&form.address_line2),
            town: optional(&form.town),
            eircode: optional(&form.eircode),

            is_association: answer(form.is_association),
            is_registered: answer(form.is_registered),
            represents_women_in_trade: answer(form.represents_women_in_trade),

            registration_type: optional(&form.registration_type),
            registration_number: optional(&form.registration_number),
            organisation_description: optional(&form.organisation_description),
            total_members: form.total_members.trim().parse().ok(),
            representative_name: optional(&form.representative_name),
            representative_email: optional(&form.representative_email),
            representative_phone: optional(&form.representative_phone),
            chairperson_name: optional(&form.chairperson_name),
            secretary_name: optional(&form.secretary_name),
            sectors: form.sectors.clone(),
            contributions: form.contributions.clone(),

            register_interest: answer(form.register_interest),
            payment_mode: optional(&form.payment_mode).map(|mode| mode.to_lowercase()),
            payment_reference: optional(&form.payment_reference),

            key_issues: optional(&form.key_issues),
            additional_comments: optional(&form.additional_comments),
            referral_source: form.referral_source.clone(),
            referral_other: optional(&form.referral_other),

            data_consent: form.data_consent,
        }
    }
}
