//! The wizard engine driving one application draft.

use super::navigation::{Advance, Progress};
use crate::checkpoint::{
    DraftStorage, FileStorage, Persistence, Snapshot, SnapshotError, SnapshotFormat,
};
use crate::config::WizardConfig;
use crate::core::{
    sequence, steps, violations, Direction, FieldUpdate, FormData, NavigationHistory,
    StepDescriptor, StepId, StepMove, StepViolation,
};
use crate::draft::DraftStore;
use crate::submission::{ApplicationApi, ApplicationPayload, SubmissionError, SubmissionReceipt};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Application wizard: draft state, persistence and navigation.
///
/// The saved draft is restored in the constructor, before any path is
/// computed, and every mutation is written back through the persistence
/// adapter.
pub struct Wizard<S: DraftStorage> {
    store: DraftStore,
    persistence: Persistence<S>,
    history: NavigationHistory,
}

impl<S: DraftStorage> Wizard<S> {
    /// Create a wizard, restoring any saved draft from `storage`.
    pub fn restore(storage: S, format: SnapshotFormat) -> Self {
        let mut persistence = Persistence::new(storage, format);
        let store = persistence
            .load()
            .map(Snapshot::into_store)
            .unwrap_or_default();

        Self {
            store,
            persistence,
            history: NavigationHistory::new(),
        }
    }

    /// Create a wizard using JSON snapshots.
    pub fn new(storage: S) -> Self {
        Self::restore(storage, SnapshotFormat::Json)
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    pub fn form(&self) -> &FormData {
        self.store.form()
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Step descriptors for the current answers.
    pub fn steps(&self) -> Vec<StepDescriptor> {
        steps(self.store.form())
    }

    pub fn step_ids(&self) -> Vec<StepId> {
        sequence(self.store.form())
    }

    pub fn current_step(&self) -> StepId {
        self.store.current_step()
    }

    pub fn current_index(&self) -> usize {
        self.store.current_index()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: self.current_index() + 1,
            total: self.step_ids().len(),
        }
    }

    /// Whether the current step passes its gate.
    pub fn can_advance(&self) -> bool {
        self.current_violations().is_empty()
    }

    pub fn current_violations(&self) -> Vec<StepViolation> {
        violations(self.current_step(), self.store.form())
    }

    /// Move forward one step if the current step passes its gate.
    pub fn next(&mut self) -> Advance {
        let current = self.current_step();
        let blocking = self.current_violations();
        if !blocking.is_empty() {
            debug!(step = %current, count = blocking.len(), "Forward navigation blocked");
            return Advance::Blocked {
                step: current,
                violations: blocking,
            };
        }

        let path = self.step_ids();
        let next = path
            .iter()
            .position(|step| *step == current)
            .and_then(|i| path.get(i + 1))
            .copied();

        match next {
            Some(step) => {
                self.move_to(step, Direction::Forward);
                Advance::Moved(step)
            }
            None => Advance::AtEnd,
        }
    }

    /// Move back one step. Never gated; `None` on the first step.
    pub fn back(&mut self) -> Option<StepId> {
        let index = self.current_index();
        if index == 0 {
            return None;
        }
        let previous = self.step_ids()[index - 1];
        self.move_to(previous, Direction::Backward);
        Some(previous)
    }

    /// Jump to `target`.
    ///
    /// Backward jumps are free. Forward jumps require every step from the
    /// current one up to (not including) the target to pass its gate.
    pub fn go_to(&mut self, target: StepId) -> Advance {
        let path = self.step_ids();
        let Some(target_index) = path.iter().position(|step| *step == target) else {
            return Advance::Unavailable(target);
        };

        let current_index = self.current_index();
        if target_index <= current_index {
            if target_index < current_index {
                self.move_to(target, Direction::Backward);
            }
            return Advance::Moved(target);
        }

        for step in &path[current_index..target_index] {
            let blocking = violations(*step, self.store.form());
            if !blocking.is_empty() {
                return Advance::Blocked {
                    step: *step,
                    violations: blocking,
                };
            }
        }

        self.move_to(target, Direction::Forward);
        Advance::Moved(target)
    }

    /// Set one field, re-resolve the position and persist.
    pub fn update_field(&mut self, update: FieldUpdate) {
        debug!(field = update.field_name(), "Updating field");
        self.store.update_field(update);
        self.after_answers_changed();
    }

    /// Batched equivalent of [`Wizard::update_field`].
    pub fn update_fields<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = FieldUpdate>,
    {
        self.store.update_fields(updates);
        self.after_answers_changed();
    }

    /// Discard the draft and start over. The cleared draft is persisted.
    pub fn reset_form(&mut self) {
        self.store.reset_form();
        self.history = NavigationHistory::new();
        self.persistence.save(&self.store);
    }

    /// Reset the draft and erase the saved snapshot.
    pub fn clear_saved_data(&mut self) {
        self.store.reset_form();
        self.history = NavigationHistory::new();
        self.persistence.clear();
    }

    /// Submit the draft through `api`.
    ///
    /// Refuses with [`SubmissionError::NotReady`] unless every step on the
    /// current path, `submit` included, passes its gate. On success the
    /// draft and saved snapshot are cleared and the application number is
    /// recorded; on failure the draft is left intact for a retry.
    pub async fn submit<A>(&mut self, api: &A) -> Result<SubmissionReceipt, SubmissionError>
    where
        A: ApplicationApi + ?Sized,
    {
        self.ensure_ready()?;

        self.store.set_submitting(true);
        self.store.set_submission_error(None);
        self.persistence.save(&self.store);

        let payload = ApplicationPayload::from_form(self.store.form());
        info!(
            membership_type = %payload.membership_type,
            "Submitting membership application"
        );

        match api.submit(&payload).await {
            Ok(receipt) => {
                self.clear_saved_data();
                self.store
                    .set_submitted(true, Some(receipt.reference().to_string()));
                info!(reference = receipt.reference(), "Application submitted");
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "Application submission failed");
                self.store.set_submitting(false);
                self.store.set_submission_error(Some(e.display_message()));
                self.persistence.save(&self.store);
                Err(e)
            }
        }
    }

    fn ensure_ready(&self) -> Result<(), SubmissionError> {
        let path = self.step_ids();
        if !path.contains(&StepId::Submit) {
            return Err(SubmissionError::NotReady {
                reason: "Answer every question before submitting".to_string(),
            });
        }

        for step in path {
            let blocking = violations(step, self.store.form());
            if let Some(first) = blocking.first() {
                return Err(SubmissionError::NotReady {
                    reason: format!("Step '{step}' is incomplete: {first}"),
                });
            }
        }
        Ok(())
    }

    fn move_to(&mut self, to: StepId, direction: Direction) {
        let from = self.current_step();
        self.store.set_current_step(to);
        self.history = self.history.record(StepMove {
            from,
            to,
            direction,
            timestamp: Utc::now(),
        });
        debug!(%from, %to, ?direction, "Moved between steps");
        self.persistence.save(&self.store);
    }

    fn after_answers_changed(&mut self) {
        if let Some(from) = self.store.resolve_position() {
            let to = self.current_step();
            debug!(%from, %to, "Current step left the path, snapping back");
            self.history = self.history.record(StepMove {
                from,
                to,
                direction: Direction::Snapped,
                timestamp: Utc::now(),
            });
        }
        self.persistence.save(&self.store);
    }
}

impl Wizard<FileStorage> {
    /// Create a wizard backed by the file storage `config` describes.
    pub fn from_config(config: &WizardConfig) -> Result<Self, SnapshotError> {
        let storage = config.file_storage().ok_or_else(|| {
            SnapshotError::Unavailable("no data directory available".to_string())
        })?;
        Ok(Self::restore(storage, config.snapshot_format))
    }
}
