//! This crate implements an in-memory hospital directory served over HTTP.
//! It includes modules for record types, configuration, the bounded record store,
//! request validation, the directory service and the REST API.

pub mod types; // Hospital records, request payloads and validation errors.
pub mod config; // Defines and loads service configuration.
pub mod store; // Bounded FIFO record store with batch operations.
pub mod validation; // Checks submissions before they reach the store.
pub mod directory; // Directory operations and their caller-facing errors.
pub mod api; // REST routes over the directory service.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::Config;
pub use directory::{DirectoryError, DirectoryService};
pub use store::RecordStore;
