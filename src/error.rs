// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the workout core.

/// Errors surfaced by the workout core.
///
/// None of these are fatal: every failure means "the operation did not
/// happen" and the caller decides how to tell the user.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Raw input was not a finite number or broke a positivity rule.
    #[error("Invalid workout input: {0}")]
    Validation(String),

    /// The persisted payload does not match the expected record shape.
    #[error("Corrupt workout data: {0}")]
    CorruptData(String),

    /// The durable slot could not be read or written.
    #[error("Storage error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message shown to the user when form input is rejected.
    pub const INVALID_INPUT_ALERT: &'static str = "Inputs have to be positive numbers";

    /// Short machine-readable label for logs and the driver.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::CorruptData(_) => "corrupt_data",
            AppError::Persistence(_) => "persistence_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether the session can carry on after this error.
    ///
    /// Validation errors need a resubmission, corrupt data is discarded,
    /// and storage failures fall back to in-memory state.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Internal(_))
    }

    /// Report a rule broken by stored data as corrupt data about `context`.
    ///
    /// Only the inner message is kept, so restored records are not
    /// described as user input.
    pub fn into_corrupt(self, context: impl std::fmt::Display) -> AppError {
        match self {
            AppError::Validation(msg) | AppError::CorruptData(msg) => {
                AppError::CorruptData(format!("{}: {}", context, msg))
            }
            other => other,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::CorruptData(err.to_string())
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AppError::Validation("x".into()).kind(), "validation_error");
        assert_eq!(AppError::CorruptData("x".into()).kind(), "corrupt_data");
        assert_eq!(AppError::Persistence("x".into()).kind(), "persistence_error");
    }

    #[test]
    fn test_serde_error_maps_to_corrupt_data() {
        let err: AppError = serde_json::from_str::<Vec<u32>>("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::CorruptData(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_into_corrupt_keeps_inner_message() {
        let err = AppError::Validation("distance must be a positive number".to_string())
            .into_corrupt("workout 42");
        assert_eq!(
            err.to_string(),
            "Corrupt workout data: workout 42: distance must be a positive number"
        );

        let err = AppError::Persistence("offline".to_string()).into_corrupt("workout 42");
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[test]
    fn test_display() {
        let err = AppError::Persistence("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Storage error: quota exceeded");
    }
}
