//! Request Validation Module
//!
//! This module validates hospital submissions before they reach the store.
//! Names and addresses must contain something other than whitespace.

mod validator;
pub use validator::Validator;
