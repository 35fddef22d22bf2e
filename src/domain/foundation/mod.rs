//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types that form the
//! vocabulary of the partnership analysis domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AnalysisId, CompanyId, OpportunityId};
pub use timestamp::Timestamp;
