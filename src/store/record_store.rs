//! Record Store Module
//!
//! This module implements the bounded, insertion-ordered store of hospital records.
//! Records are kept in a FIFO queue; once the queue grows past its capacity the
//! oldest record is evicted. Identifiers come from a counter that lives beside the
//! queue and is never rewound, so an evicted id is never handed out again.

use crate::{Hospital, HospitalCreate};
use chrono::Utc;
use std::collections::VecDeque;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Outcome of a guarded batch activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchActivation {
    /// No record carries the batch id
    Empty,
    /// At least one member was already active; nothing was changed
    AlreadyActive,
    /// Every member was inactive and has been activated
    Activated(usize),
}

/// Queue and id counter, always locked together
struct Inner {
    records: VecDeque<Hospital>,
    next_id: u64,
}

impl Inner {
    fn insert(&mut self, candidate: HospitalCreate, capacity: usize) -> Hospital {
        let id = self.next_id;
        self.next_id += 1;

        let hospital = Hospital {
            id,
            name: candidate.name,
            address: candidate.address,
            phone: candidate.phone,
            active: candidate.creation_batch_id.is_none(),
            creation_batch_id: candidate.creation_batch_id,
            created_at: Utc::now(),
        };

        self.records.push_back(hospital.clone());
        if self.records.len() > capacity {
            if let Some(evicted) = self.records.pop_front() {
                debug!("Store at capacity {}, evicted hospital {}", capacity, evicted.id);
            }
        }

        hospital
    }

    fn batch_members(&self, batch_id: Uuid) -> impl Iterator<Item = &Hospital> {
        self.records
            .iter()
            .filter(move |h| h.creation_batch_id == Some(batch_id))
    }

    fn activate_batch(&mut self, batch_id: Uuid) -> usize {
        let mut activated = 0;
        for hospital in self
            .records
            .iter_mut()
            .filter(|h| h.creation_batch_id == Some(batch_id) && !h.active)
        {
            hospital.active = true;
            activated += 1;
        }
        activated
    }
}

/// Bounded store of hospital records
///
/// Sole owner of the record queue and the id counter. Every operation takes the
/// lock once, so each call is indivisible with respect to every other call.
/// Reads return owned snapshots.
pub struct RecordStore {
    /// Records and id counter, protected by a read-write lock
    inner: RwLock<Inner>,
    /// Maximum number of records held before eviction
    capacity: usize,
}

impl RecordStore {
    /// Creates an empty store holding at most `capacity` records
    ///
    /// The first id assigned is 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: VecDeque::new(),
                next_id: 1,
            }),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Store a new record
    ///
    /// Assigns the next id, marks the record active unless it belongs to a batch,
    /// timestamps it and appends it. If this pushes the store past capacity the
    /// oldest record is evicted. Never fails.
    pub async fn create(&self, candidate: HospitalCreate) -> Hospital {
        let mut inner = self.inner.write().await;
        inner.insert(candidate, self.capacity)
    }

    /// Store a new record unless its batch already holds `max_batch_size` members
    ///
    /// The size check and the insert happen under the same lock. Returns `None`
    /// without consuming an id when the batch is full. Candidates without a batch
    /// id are always stored.
    pub async fn create_in_batch(
        &self,
        candidate: HospitalCreate,
        max_batch_size: usize,
    ) -> Option<Hospital> {
        let mut inner = self.inner.write().await;

        if let Some(batch_id) = candidate.creation_batch_id {
            if inner.batch_members(batch_id).count() >= max_batch_size {
                return None;
            }
        }

        Some(inner.insert(candidate, self.capacity))
    }

    pub async fn get_by_id(&self, id: u64) -> Option<Hospital> {
        let inner = self.inner.read().await;
        inner.records.iter().find(|h| h.id == id).cloned()
    }

    /// Snapshot of all records, oldest first
    pub async fn get_all(&self) -> Vec<Hospital> {
        let inner = self.inner.read().await;
        inner.records.iter().cloned().collect()
    }

    /// Replace the record stored under `id`, keeping its position
    ///
    /// This is a full replace, not a merge. The replacement keeps `id` as its
    /// identifier. Returns `None` if no record has that id.
    pub async fn update(&self, id: u64, mut replacement: Hospital) -> Option<Hospital> {
        let mut inner = self.inner.write().await;
        let slot = inner.records.iter_mut().find(|h| h.id == id)?;

        replacement.id = id;
        *slot = replacement.clone();
        Some(replacement)
    }

    /// Edit the live record stored under `id` in place
    ///
    /// `edit` runs under the write lock, so fields it leaves alone keep
    /// whatever value they hold at that moment. The record's id is restored
    /// afterwards. Returns the edited record, or `None` if no record has that id.
    pub async fn modify<F>(&self, id: u64, edit: F) -> Option<Hospital>
    where
        F: FnOnce(&mut Hospital),
    {
        let mut inner = self.inner.write().await;
        let slot = inner.records.iter_mut().find(|h| h.id == id)?;

        edit(&mut *slot);
        slot.id = id;
        Some(slot.clone())
    }

    /// Remove the record with `id`; returns whether anything was removed
    pub async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.records.iter().position(|h| h.id == id) {
            Some(index) => inner.records.remove(index).is_some(),
            None => false,
        }
    }

    /// Members of a batch in store order; empty if the batch has none
    pub async fn get_by_batch(&self, batch_id: Uuid) -> Vec<Hospital> {
        let inner = self.inner.read().await;
        inner.batch_members(batch_id).cloned().collect()
    }

    /// Remove every member of a batch and return how many were removed
    pub async fn delete_by_batch(&self, batch_id: Uuid) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner
            .records
            .retain(|h| h.creation_batch_id != Some(batch_id));
        before - inner.records.len()
    }

    pub async fn has_active_in_batch(&self, batch_id: Uuid) -> bool {
        let inner = self.inner.read().await;
        inner.batch_members(batch_id).any(|h| h.active)
    }

    /// Activate every inactive member of a batch
    ///
    /// Already-active members are left alone. Returns the number of records
    /// flipped. Does not check whether any member was already active; see
    /// [`RecordStore::activate_batch_if_inactive`] for the guarded form.
    pub async fn activate_by_batch(&self, batch_id: Uuid) -> usize {
        let mut inner = self.inner.write().await;
        inner.activate_batch(batch_id)
    }

    /// Activate a batch only if none of its members is active yet
    ///
    /// The precondition check and the activation happen under the same lock, so
    /// a rejected call never leaves a partially activated batch behind.
    pub async fn activate_batch_if_inactive(&self, batch_id: Uuid) -> BatchActivation {
        let mut inner = self.inner.write().await;

        let (found, any_active) = inner
            .batch_members(batch_id)
            .fold((false, false), |(_, active), h| (true, active || h.active));
        if !found {
            return BatchActivation::Empty;
        }
        if any_active {
            return BatchActivation::AlreadyActive;
        }

        BatchActivation::Activated(inner.activate_batch(batch_id))
    }
}
