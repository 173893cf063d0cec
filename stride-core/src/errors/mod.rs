//! Error handling for Stride.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod build_error;
pub mod config_error;
pub mod error_code;
pub mod storage_error;
pub mod stride_error;

pub use build_error::BuildError;
pub use config_error::ConfigError;
pub use error_code::StrideErrorCode;
pub use storage_error::StorageError;
pub use stride_error::StrideError;
