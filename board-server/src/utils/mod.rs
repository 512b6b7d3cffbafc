//! Utility Module
//!
//! Common helpers shared across the server: error types, result aliases,
//! logging setup.

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, AppResponse, ok};
pub use result::AppResult;
