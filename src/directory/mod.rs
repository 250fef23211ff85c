//! Directory Service Module
//!
//! This module sits between the HTTP layer and the record store:
//! - Validates submissions and applies partial updates
//! - Enforces the batch-size admission rule and the activation precondition
//! - Maps empty store results to `NotFound`

mod error;
mod service;


pub use error::DirectoryError;
pub use service::DirectoryService;
