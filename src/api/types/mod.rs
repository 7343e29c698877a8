//! Shared API types

mod error;
mod extract;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use extract::{empty_as_none, Json, Query};
