//! Forest build errors.

use super::error_code::{self, StrideErrorCode};

/// Errors that can occur while building a forest from a journey source.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Journey source failed: {message}")]
    SourceFailed { message: String },

    #[error("Journey {journey} could not be read: {message}")]
    JourneyRead { journey: i64, message: String },
}

impl StrideErrorCode for BuildError {
    fn error_code(&self) -> &'static str {
        error_code::BUILD_ERROR
    }
}
