//! NIOS WAPI client

pub mod client;
pub mod common;
pub mod error;
pub mod grid;
pub mod pool;

pub(crate) mod test_helpers;

pub use client::{Client, RetryConfig};
pub use common::{ApiErrorDetails, ApiQueryParams, WapiObject};
pub use error::ApiError;
