//! Request extractors whose rejections answer with the same
//! `{"detail": ...}` body as every other directory error.

use crate::directory::DirectoryError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(DirectoryError))]
pub struct JsonBody<T>(pub T);

/// Typed path parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(DirectoryError))]
pub struct PathParam<T>(pub T);
