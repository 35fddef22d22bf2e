//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' must be a finite number")]
    NotFinite { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a non-finite number validation error.
    pub fn not_finite(field: impl Into<String>) -> Self {
        ValidationError::NotFinite { field: field.into() }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotFinite { field } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Caller errors
    InvalidInput,

    // Not found errors
    CompanyNotFound,
    OpportunityNotFound,

    // Collaborator errors
    UpstreamScoringFailure,
    PersistenceFailed,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::CompanyNotFound => "COMPANY_NOT_FOUND",
            ErrorCode::OpportunityNotFound => "OPPORTUNITY_NOT_FOUND",
            ErrorCode::UpstreamScoringFailure => "UPSTREAM_SCORING_FAILURE",
            ErrorCode::PersistenceFailed => "PERSISTENCE_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates an invalid input error for a specific field.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message).with_detail("field", field.into())
    }

    /// Creates an upstream scoring failure, keeping the collaborator's message.
    pub fn scoring_failure(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamScoringFailure, message).with_detail("subject", subject)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// True for missing companies and opportunities.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::CompanyNotFound | ErrorCode::OpportunityNotFound
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::invalid_input(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("total_score");
        assert_eq!(format!("{}", err), "Field 'total_score' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("effort_ratio_a", 0.0, 1.0, 1.5);
        assert_eq!(
            format!("{}", err),
            "Field 'effort_ratio_a' must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::CompanyNotFound, "Company not found");
        assert_eq!(format!("{}", err), "[COMPANY_NOT_FOUND] Company not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::invalid_input("score_a", "Missing total score")
            .with_detail("reason", "null");

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.details.get("field"), Some(&"score_a".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"null".to_string()));
    }

    #[test]
    fn validation_error_converts_to_invalid_input() {
        let err: DomainError = ValidationError::not_finite("combined").into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.details.get("field"), Some(&"combined".to_string()));
    }

    #[test]
    fn not_found_covers_company_and_opportunity() {
        assert!(DomainError::new(ErrorCode::CompanyNotFound, "x").is_not_found());
        assert!(DomainError::new(ErrorCode::OpportunityNotFound, "x").is_not_found());
        assert!(!DomainError::new(ErrorCode::UpstreamScoringFailure, "x").is_not_found());
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(
            format!("{}", ErrorCode::UpstreamScoringFailure),
            "UPSTREAM_SCORING_FAILURE"
        );
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
