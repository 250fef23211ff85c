//! Record Store Module
//!
//! This module holds every hospital record the service knows about:
//! - A bounded FIFO queue of records with oldest-first eviction
//! - A monotonic id counter independent of the queue's contents
//! - Batch-scoped queries, deletion and activation

mod record_store;


pub use record_store::{BatchActivation, RecordStore};
