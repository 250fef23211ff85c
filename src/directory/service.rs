//! Directory Service Module
//!
//! Translates directory requests into record store operations and turns store
//! outcomes into caller-facing results. The store treats an empty batch as a
//! normal answer; here it becomes `NotFound`.

use crate::{
    BatchActivated, BatchDeleted, Hospital, HospitalCreate, HospitalUpdate,
    config::StoreConfig,
    directory::DirectoryError,
    store::{BatchActivation, RecordStore},
    validation::Validator,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Hospital directory operations
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<RecordStore>,
    max_batch_size: usize,
}

impl DirectoryService {
    /// Creates a service over `store` enforcing `max_batch_size` per creation batch
    pub fn new(store: Arc<RecordStore>, max_batch_size: usize) -> Self {
        Self {
            store,
            max_batch_size,
        }
    }

    /// Creates a service with a fresh store sized from configuration
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            Arc::new(RecordStore::new(config.max_capacity)),
            config.max_batch_size,
        )
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Create a hospital
    ///
    /// Batched submissions are admitted only while the batch holds fewer than
    /// the configured maximum; the check and the insert are one store call.
    pub async fn create(&self, candidate: HospitalCreate) -> Result<Hospital, DirectoryError> {
        Validator::validate_create(&candidate)?;

        let batch_id = candidate.creation_batch_id;
        let hospital = self
            .store
            .create_in_batch(candidate, self.max_batch_size)
            .await
            .ok_or_else(|| {
                warn!("Batch {:?} is full ({} hospitals)", batch_id, self.max_batch_size);
                DirectoryError::CapacityExceeded {
                    limit: self.max_batch_size,
                }
            })?;

        info!("Created hospital {} (batch {:?})", hospital.id, hospital.creation_batch_id);
        Ok(hospital)
    }

    pub async fn list(&self) -> Vec<Hospital> {
        self.store.get_all().await
    }

    pub async fn get(&self, id: u64) -> Result<Hospital, DirectoryError> {
        self.store
            .get_by_id(id)
            .await
            .ok_or_else(DirectoryError::hospital_not_found)
    }

    /// Apply the supplied fields of `update` to the hospital with `id`
    pub async fn update(&self, id: u64, update: HospitalUpdate) -> Result<Hospital, DirectoryError> {
        Validator::validate_update(&update)?;

        // Merged onto the live record so a concurrent activation is kept.
        let updated = self
            .store
            .modify(id, |hospital| update.apply_to(hospital))
            .await
            .ok_or_else(DirectoryError::hospital_not_found)?;

        info!("Updated hospital {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<(), DirectoryError> {
        if !self.store.delete(id).await {
            return Err(DirectoryError::hospital_not_found());
        }
        info!("Deleted hospital {}", id);
        Ok(())
    }

    pub async fn get_batch(&self, batch_id: Uuid) -> Result<Vec<Hospital>, DirectoryError> {
        let hospitals = self.store.get_by_batch(batch_id).await;
        if hospitals.is_empty() {
            return Err(DirectoryError::batch_not_found());
        }
        Ok(hospitals)
    }

    pub async fn delete_batch(&self, batch_id: Uuid) -> Result<BatchDeleted, DirectoryError> {
        let deleted_count = self.store.delete_by_batch(batch_id).await;
        if deleted_count == 0 {
            return Err(DirectoryError::batch_not_found());
        }

        info!("Deleted {} hospital(s) in batch {}", deleted_count, batch_id);
        Ok(BatchDeleted {
            deleted_count,
            message: format!(
                "Deleted {} hospital(s) with batch ID {}",
                deleted_count, batch_id
            ),
        })
    }

    /// Activate every member of a batch
    ///
    /// Rejected with `Conflict` if any member is already active, in which case
    /// no member is changed.
    pub async fn activate_batch(&self, batch_id: Uuid) -> Result<BatchActivated, DirectoryError> {
        match self.store.activate_batch_if_inactive(batch_id).await {
            BatchActivation::Empty => Err(DirectoryError::batch_not_found()),
            BatchActivation::AlreadyActive => {
                warn!("Batch {} already has active hospitals", batch_id);
                Err(DirectoryError::batch_already_active())
            }
            BatchActivation::Activated(activated_count) => {
                info!("Activated {} hospital(s) in batch {}", activated_count, batch_id);
                Ok(BatchActivated {
                    activated_count,
                    message: format!(
                        "Activated {} hospital(s) with batch ID {}",
                        activated_count, batch_id
                    ),
                })
            }
        }
    }
}
