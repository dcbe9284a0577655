//! # Error Types
//!
//! Structured error types for statics_core. Two tiers exist:
//!
//! - **Engineering failures** (unstable structure, unsupported support pattern,
//!   unsolved truss, missing supports, failed equilibrium check) are expected
//!   outcomes of bad models. Solvers report them *inside* a result object with
//!   `is_valid = false`, carrying [`CalcError::to_string`] as the user-facing
//!   message and [`CalcError::error_code`] for programmatic handling. These
//!   messages are localized (Turkish) because they are shown to end users.
//! - **Contract violations** (NaN inputs, a member pointing at a node that does
//!   not exist, a load range with `start >= end`) are returned as `Err`.
//!
//! ## Example
//!
//! ```rust
//! use statics_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length",
//!             length_m.to_string(),
//!             "Beam length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for statics_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value violates the model contract (out of range, non-finite, dangling id)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Not enough restraint to hold the structure in place
    #[error("Sistem stabil değil: yetersiz mesnet ({unknowns} bilinmeyen, en az {required} gerekli)")]
    Unstable { unknowns: usize, required: usize },

    /// Support pattern is recognized as indeterminate or unknown and has no solver
    #[error("Desteklenmeyen mesnet düzeni: {pattern}")]
    UnsupportedConfiguration { pattern: String },

    /// Truss has more unknowns than joint equations
    #[error("Sistem hiperstatik ({unknowns} bilinmeyen, {equations} denklem); bu çözücü yalnızca izostatik kafes sistemleri çözer")]
    Indeterminate { unknowns: usize, equations: usize },

    /// Method of joints ran out of iterations with members still unknown
    #[error("Bazı çubuklar çözülemedi ({unsolved} çubuk bilinmiyor)")]
    UnsolvedSystem { unsolved: usize },

    /// Truss has no node marked as a support
    #[error("Mesnet tanımlanmamış: en az bir düğüm mesnet olarak işaretlenmeli")]
    MissingSupport,

    /// Reactions do not balance the applied loads
    #[error("Denge kontrolü başarısız (ΣFx = {sum_fx:.6}, ΣFy = {sum_fy:.6}, ΣM = {sum_m:.6})")]
    EquilibriumNotSatisfied { sum_fx: f64, sum_fy: f64, sum_m: f64 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Another process holds the project file lock
    #[error("File locked: '{path}' is held by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an Unstable error
    pub fn unstable(unknowns: usize, required: usize) -> Self {
        CalcError::Unstable { unknowns, required }
    }

    /// Create an UnsupportedConfiguration error
    pub fn unsupported(pattern: impl Into<String>) -> Self {
        CalcError::UnsupportedConfiguration {
            pattern: pattern.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Whether this error is an expected engineering outcome (reported on the
    /// result object) rather than a broken caller contract.
    pub fn is_analysis_failure(&self) -> bool {
        matches!(
            self,
            CalcError::Unstable { .. }
                | CalcError::UnsupportedConfiguration { .. }
                | CalcError::Indeterminate { .. }
                | CalcError::UnsolvedSystem { .. }
                | CalcError::MissingSupport
                | CalcError::EquilibriumNotSatisfied { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::Unstable { .. } => "UNSTABLE",
            CalcError::UnsupportedConfiguration { .. } => "UNSUPPORTED_CONFIGURATION",
            CalcError::Indeterminate { .. } => "INDETERMINATE",
            CalcError::UnsolvedSystem { .. } => "UNSOLVED_SYSTEM",
            CalcError::MissingSupport => "MISSING_SUPPORT",
            CalcError::EquilibriumNotSatisfied { .. } => "EQUILIBRIUM_NOT_SATISFIED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("length", "-5", "Beam length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_unit_variant_serialization() {
        let json = serde_json::to_string(&CalcError::MissingSupport).unwrap();
        assert_eq!(json, r#"{"type":"MissingSupport"}"#);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unstable(2, 3).error_code(), "UNSTABLE");
        assert_eq!(CalcError::unsupported("3 mesnet").error_code(), "UNSUPPORTED_CONFIGURATION");
        assert_eq!(CalcError::UnsolvedSystem { unsolved: 1 }.error_code(), "UNSOLVED_SYSTEM");
        assert_eq!(CalcError::file_locked("a.json", "eng", "now").error_code(), "FILE_LOCKED");
    }

    #[test]
    fn test_analysis_failure_tier() {
        assert!(CalcError::unstable(2, 3).is_analysis_failure());
        assert!(CalcError::MissingSupport.is_analysis_failure());
        assert!(!CalcError::invalid_input("x", "NaN", "must be finite").is_analysis_failure());
        assert!(!CalcError::file_error("open", "a.json", "not found").is_analysis_failure());
    }

    #[test]
    fn test_unstable_message_mentions_counts() {
        let msg = CalcError::unstable(2, 3).to_string();
        assert!(msg.contains("stabil"));
        assert!(msg.contains('2'));
    }
}
