//! Mutable draft of an application.
//!
//! `DraftStore` holds the answer record, the applicant's position and the
//! submission flags. Writes are plain writes: validation lives in the gate,
//! persistence in the checkpoint module.
//!
//! The position is held as a `StepId`, not an index. The index is derived
//! against a freshly sequenced path whenever it is needed, and
//! [`DraftStore::resolve_position`] snaps the position back onto the path
//! when an answer change removes the current step.

use crate::core::{sequence, FieldUpdate, FormData, StepId};
use serde::{Deserialize, Serialize};

/// Flags the UI reads while a submission is in progress or finished.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    pub is_submitting: bool,
    pub is_submitted: bool,
    /// Display message of the last failed submission.
    pub error: Option<String>,
    /// Identifier the backend assigned to the submitted application.
    pub application_number: Option<String>,
}

/// In-memory draft state for one applicant.
#[derive(Clone, Debug, PartialEq)]
pub struct DraftStore {
    form: FormData,
    current_step: StepId,
    form_started: bool,
    submission: SubmissionStatus,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftStore {
    pub fn new() -> Self {
        Self {
            form: FormData::default(),
            current_step: StepId::Email,
            form_started: false,
            submission: SubmissionStatus::default(),
        }
    }

    /// Rebuild a draft from restored parts. The position is re-resolved
    /// against the restored answers.
    pub fn from_parts(form: FormData, current_step: StepId, form_started: bool) -> Self {
        let mut store = Self {
            form,
            current_step,
            form_started,
            submission: SubmissionStatus::default(),
        };
        store.resolve_position();
        store
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    pub fn form_started(&self) -> bool {
        self.form_started
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    /// The path for the current answers.
    pub fn path(&self) -> Vec<StepId> {
        sequence(&self.form)
    }

    /// Zero-based index of the current step in the current path.
    pub fn current_index(&self) -> usize {
        self.path()
            .iter()
            .position(|step| *step == self.current_step)
            .unwrap_or(0)
    }

    /// Set one field and mark the form as started.
    pub fn update_field(&mut self, update: FieldUpdate) {
        self.form.apply(update);
        self.form_started = true;
    }

    /// Batched equivalent of [`DraftStore::update_field`].
    pub fn update_fields<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = FieldUpdate>,
    {
        for update in updates {
            self.form.apply(update);
        }
        self.form_started = true;
    }

    /// Move to `step` without any gating. Callers decide whether the move
    /// is allowed.
    pub fn set_current_step(&mut self, step: StepId) {
        self.current_step = step;
    }

    /// Snap the position back onto the current path.
    ///
    /// When the held step is no longer on the path, the position becomes the
    /// last step on the path that does not come after it in catalogue order.
    /// `email` heads every path, so such a step always exists. Returns the
    /// previous step when the position changed.
    pub fn resolve_position(&mut self) -> Option<StepId> {
        let path = self.path();
        if path.contains(&self.current_step) {
            return None;
        }

        let held = self.current_step;
        let snapped = path
            .iter()
            .rev()
            .find(|step| step.ordinal() <= held.ordinal())
            .copied()
            .unwrap_or(StepId::Email);
        self.current_step = snapped;
        Some(held)
    }

    /// Restore the empty draft, first step and cleared flags.
    pub fn reset_form(&mut self) {
        *self = Self::new();
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submission.is_submitting = submitting;
    }

    pub fn set_submitted(&mut self, submitted: bool, application_number: Option<String>) {
        self.submission.is_submitted = submitted;
        self.submission.application_number = application_number;
    }

    pub fn set_submission_error(&mut self, error: Option<String>) {
        self.submission.error = error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MembershipType, TriState};

    fn full_applicant() -> DraftStore {
        let mut store = DraftStore::new();
        store.update_fields([
            FieldUpdate::MembershipType(MembershipType::Full),
            FieldUpdate::IsAssociation(TriState::Yes),
            FieldUpdate::IsRegistered(TriState::Yes),
            FieldUpdate::RepresentsWomenInTrade(TriState::Yes),
        ]);
        store
    }

    #[test]
    fn new_store_starts_empty_on_first_step() {
        let store = DraftStore::new();
        assert!(store.form().is_empty());
        assert_eq!(store.current_step(), StepId::Email);
        assert_eq!(store.current_index(), 0);
        assert!(!store.form_started());
        assert_eq!(store.submission(), &SubmissionStatus::default());
    }

    #[test]
    fn update_field_marks_form_started() {
        let mut store = DraftStore::new();
        store.update_field(FieldUpdate::County("Kerry".to_string()));

        assert!(store.form_started());
        assert_eq!(store.form().county, "Kerry");
    }

    #[test]
    fn update_fields_applies_in_order() {
        let mut store = DraftStore::new();
        store.update_fields([
            FieldUpdate::Town("Tralee".to_string()),
            FieldUpdate::Town("Dingle".to_string()),
        ]);
        assert_eq!(store.form().town, "Dingle");
    }

    #[test]
    fn current_index_follows_the_path() {
        let mut store = full_applicant();
        store.set_current_step(StepId::AssociationDetails);
        assert_eq!(store.current_index(), 5);

        store.update_field(FieldUpdate::RepresentsWomenInTrade(TriState::No));
        store.resolve_position();
        assert_eq!(store.current_step(), StepId::Eligibility3);
        assert_eq!(store.current_index(), 4);
    }

    #[test]
    fn resolve_position_is_noop_when_step_still_on_path() {
        let mut store = full_applicant();
        store.set_current_step(StepId::KeyIssues);
        store.update_field(FieldUpdate::RepresentsWomenInTrade(TriState::No));

        assert_eq!(store.resolve_position(), None);
        assert_eq!(store.current_step(), StepId::KeyIssues);
    }

    #[test]
    fn resolve_position_snaps_to_nearest_preceding_step() {
        let mut store = full_applicant();
        store.set_current_step(StepId::MembershipContribution);

        store.update_field(FieldUpdate::IsAssociation(TriState::No));
        assert_eq!(
            store.resolve_position(),
            Some(StepId::MembershipContribution)
        );
        assert_eq!(store.current_step(), StepId::Eligibility1);
    }

    #[test]
    fn clearing_membership_type_snaps_to_basic_info() {
        let mut store = full_applicant();
        store.set_current_step(StepId::Submit);
        store.update_field(FieldUpdate::MembershipType(MembershipType::Unset));
        store.resolve_position();
        assert_eq!(store.current_step(), StepId::BasicInfo);
    }

    #[test]
    fn from_parts_resolves_position_against_restored_answers() {
        let form = FormData {
            membership_type: MembershipType::Associate,
            ..Default::default()
        };
        let store = DraftStore::from_parts(form, StepId::KeyIssues, true);
        assert_eq!(store.current_step(), StepId::BasicInfo);
        assert!(store.form_started());
    }

    #[test]
    fn reset_form_restores_defaults() {
        let mut store = full_applicant();
        store.set_current_step(StepId::Eligibility2);
        store.set_submitting(true);
        store.set_submission_error(Some("network down".to_string()));

        store.reset_form();
        assert_eq!(store, DraftStore::new());
    }

    #[test]
    fn submission_flags_are_plain_writes() {
        let mut store = DraftStore::new();
        store.set_submitting(true);
        assert!(store.submission().is_submitting);

        store.set_submitted(true, Some("APP-0042".to_string()));
        assert!(store.submission().is_submitted);
        assert_eq!(
            store.submission().application_number.as_deref(),
            Some("APP-0042")
        );
        assert!(store.form().is_empty());
    }
}
