//! Convenience result type alias for GasDesk.

use crate::error::AppError;

/// A specialized `Result` type for GasDesk operations.
pub type AppResult<T> = Result<T, AppError>;
