//! HTTP boundary for the metadata context API.
//!
//! Owns request validation and error-to-status mapping; all context building
//! is delegated to [`ContextSynthesizer`](crate::context::ContextSynthesizer).

mod error;
mod server;
mod validation;

pub use error::{ApiError, ErrorBody};
pub use server::{router, serve, AppState};
pub use validation::{validate_app_name, AppNames, ValidationError, MAX_APPS};
