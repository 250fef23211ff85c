//! API Module
//!
//! This module handles the REST API of the hospital directory.
//! It provides the HTTP routes that clients use to manage hospitals and batches.

mod extract;
mod server;

#[cfg(test)]
mod tests;

pub use server::{AppState, Server};
