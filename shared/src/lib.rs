//! Shared types for the event-booking platform
//!
//! - [`error`] - error codes, [`AppError`](error::AppError), HTTP mapping
//! - [`response`] - the `{success, message, error, data}` envelope
//! - [`models`] - consultation and restaurant models
//! - [`util`] - time and id helpers

pub mod error;
pub mod models;
pub mod response;
pub mod util;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorKind};
pub use response::ApiResponse;
