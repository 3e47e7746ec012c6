//! Draft persistence across reloads.
//!
//! A [`Snapshot`] captures `{form_data, current_step, form_started}` plus a
//! format version. [`Persistence`] writes one on every mutation and reads
//! one at startup. Storage is a convenience: every failure is logged and
//! swallowed so the in-memory draft keeps working for the session.

use crate::core::{FormData, StepId};
use crate::draft::DraftStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

pub mod error;
pub mod storage;

pub use error::SnapshotError;
pub use storage::{default_data_dir, DraftStorage, FileStorage, MemoryStorage};

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Encoding used for stored snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Human-readable JSON.
    #[default]
    Json,
    /// Compact bincode.
    Binary,
}

impl SnapshotFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "bin",
        }
    }
}

/// Serializable state of a draft in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Identifier of the draft; stable across saves of the same draft
    pub id: Uuid,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,

    pub form_data: FormData,
    pub current_step: StepId,
    pub form_started: bool,
}

impl Snapshot {
    /// Capture the persisted subset of a draft.
    pub fn capture(id: Uuid, store: &DraftStore) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id,
            saved_at: Utc::now(),
            form_data: store.form().clone(),
            current_step: store.current_step(),
            form_started: store.form_started(),
        }
    }

    /// Rebuild a draft. Submission flags are not persisted and start cleared.
    pub fn into_store(self) -> DraftStore {
        DraftStore::from_parts(self.form_data, self.current_step, self.form_started)
    }

    pub fn encode(&self, format: SnapshotFormat) -> Result<Vec<u8>, SnapshotError> {
        match format {
            SnapshotFormat::Json => serde_json::to_vec(self)
                .map_err(|e| SnapshotError::SerializationFailed(e.to_string())),
            SnapshotFormat::Binary => bincode::serialize(self)
                .map_err(|e| SnapshotError::SerializationFailed(e.to_string())),
        }
    }

    /// Decode and reject snapshots written by another format version.
    pub fn decode(bytes: &[u8], format: SnapshotFormat) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = match format {
            SnapshotFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?,
            SnapshotFormat::Binary => bincode::deserialize(bytes)
                .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?,
        };

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}

/// Writes and restores snapshots through a [`DraftStorage`], never failing.
pub struct Persistence<S: DraftStorage> {
    storage: S,
    format: SnapshotFormat,
    draft_id: Uuid,
}

impl<S: DraftStorage> Persistence<S> {
    pub fn new(storage: S, format: SnapshotFormat) -> Self {
        Self {
            storage,
            format,
            draft_id: Uuid::new_v4(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    pub fn draft_id(&self) -> Uuid {
        self.draft_id
    }

    /// Read the stored snapshot, propagating failures.
    pub fn try_load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        match self.storage.load()? {
            Some(bytes) => Snapshot::decode(&bytes, self.format).map(Some),
            None => Ok(None),
        }
    }

    /// Read the stored snapshot; unreadable or incompatible data counts as
    /// nothing saved.
    pub fn load(&mut self) -> Option<Snapshot> {
        match self.try_load() {
            Ok(Some(snapshot)) => {
                debug!(
                    draft_id = %snapshot.id,
                    step = %snapshot.current_step,
                    "Restored saved draft"
                );
                self.draft_id = snapshot.id;
                Some(snapshot)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Ignoring saved draft that could not be restored");
                None
            }
        }
    }

    /// Write a snapshot of `store`, propagating failures.
    pub fn try_save(&mut self, store: &DraftStore) -> Result<(), SnapshotError> {
        let bytes = Snapshot::capture(self.draft_id, store).encode(self.format)?;
        self.storage.save(&bytes)
    }

    /// Write a snapshot of `store`; failures are logged and dropped.
    pub fn save(&mut self, store: &DraftStore) {
        if let Err(e) = self.try_save(store) {
            warn!(error = %e, "Failed to persist draft");
        }
    }

    /// Erase the stored snapshot and start a fresh draft identity.
    pub fn clear(&mut self) {
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to erase saved draft");
        }
        self.draft_id = Uuid::new_v4();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldUpdate, MembershipType, TriState};

    struct BrokenStorage;

    impl DraftStorage for BrokenStorage {
        fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError> {
            Err(SnapshotError::Unavailable("storage disabled".to_string()))
        }

        fn save(&mut self, _bytes: &[u8]) -> Result<(), SnapshotError> {
            Err(SnapshotError::Unavailable("quota exceeded".to_string()))
        }

        fn clear(&mut self) -> Result<(), SnapshotError> {
            Err(SnapshotError::Unavailable("storage disabled".to_string()))
        }
    }

    fn sample_store() -> DraftStore {
        let mut store = DraftStore::new();
        store.update_fields([
            FieldUpdate::Email("applicant@example.org".to_string()),
            FieldUpdate::MembershipType(MembershipType::Basic),
            FieldUpdate::IsAssociation(TriState::No),
            FieldUpdate::Sectors(Some(vec!["retail".to_string(), "food".to_string()])),
        ]);
        store.set_current_step(StepId::RegisterInterest);
        store
    }

    #[test]
    fn json_snapshot_restores_equal_draft() {
        let store = sample_store();
        let snapshot = Snapshot::capture(Uuid::new_v4(), &store);

        let bytes = snapshot.encode(SnapshotFormat::Json).unwrap();
        let restored = Snapshot::decode(&bytes, SnapshotFormat::Json).unwrap();

        assert_eq!(restored, snapshot);
        assert_eq!(restored.into_store(), store);
    }

    #[test]
    fn binary_snapshot_restores_equal_draft() {
        let store = sample_store();
        let snapshot = Snapshot::capture(Uuid::new_v4(), &store);

        let bytes = snapshot.encode(SnapshotFormat::Binary).unwrap();
        let restored = Snapshot::decode(&bytes, SnapshotFormat::Binary).unwrap();

        assert_eq!(restored.form_data, store.form().clone());
        assert_eq!(restored.current_step, StepId::RegisterInterest);
    }

    #[test]
    fn json_snapshot_uses_camel_case_keys() {
        let snapshot = Snapshot::capture(Uuid::new_v4(), &sample_store());
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["currentStep"], "register-interest");
        assert_eq!(value["formStarted"], true);
        assert_eq!(value["formData"]["membershipType"], "basic");
        assert_eq!(value["version"], SNAPSHOT_VERSION);
    }

    #[test]
    fn decode_rejects_other_versions() {
        let mut snapshot = Snapshot::capture(Uuid::new_v4(), &sample_store());
        snapshot.version = SNAPSHOT_VERSION + 1;
        let bytes = snapshot.encode(SnapshotFormat::Json).unwrap();

        let result = Snapshot::decode(&bytes, SnapshotFormat::Json);
        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn decode_reports_garbage() {
        let result = Snapshot::decode(b"not json", SnapshotFormat::Json);
        assert!(matches!(result, Err(SnapshotError::DeserializationFailed(_))));
    }

    #[test]
    fn persistence_saves_and_loads_through_storage() {
        let storage = MemoryStorage::new();
        let mut persistence = Persistence::new(storage.clone(), SnapshotFormat::Json);
        let store = sample_store();

        persistence.save(&store);
        assert!(!storage.is_empty());

        let mut reader = Persistence::new(storage, SnapshotFormat::Json);
        let snapshot = reader.load().unwrap();
        assert_eq!(snapshot.id, persistence.draft_id());
        assert_eq!(reader.draft_id(), persistence.draft_id());
        assert_eq!(snapshot.into_store(), store);
    }

    #[test]
    fn draft_id_is_stable_across_saves() {
        let storage = MemoryStorage::new();
        let mut persistence = Persistence::new(storage, SnapshotFormat::Json);
        let id = persistence.draft_id();

        persistence.save(&sample_store());
        persistence.save(&DraftStore::new());
        assert_eq!(persistence.try_load().unwrap().unwrap().id, id);
    }

    #[test]
    fn clear_erases_snapshot_and_renews_identity() {
        let storage = MemoryStorage::new();
        let mut persistence = Persistence::new(storage.clone(), SnapshotFormat::Binary);
        let id = persistence.draft_id();

        persistence.save(&sample_store());
        persistence.clear();

        assert!(storage.is_empty());
        assert_ne!(persistence.draft_id(), id);
        assert!(persistence.load().is_none());
    }

    #[test]
    fn broken_storage_fails_silently() {
        let mut persistence = Persistence::new(BrokenStorage, SnapshotFormat::Json);

        persistence.save(&sample_store());
        persistence.clear();
        assert!(persistence.load().is_none());
        assert!(persistence.try_load().is_err());
    }

    #[test]
    fn incompatible_snapshot_counts_as_nothing_saved() {
        let mut storage = MemoryStorage::new();
        storage.save(b"{\"version\": 99}").unwrap();

        let mut persistence = Persistence::new(storage, SnapshotFormat::Json);
        assert!(persistence.load().is_none());
    }
}
