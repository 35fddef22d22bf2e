//! FitScorer port - The external fit scoring collaborator.
//!
//! Scoring a company against an opportunity is owned by another part of
//! the product. The analysis calls it three times per run: once per
//! company (in any order, possibly concurrently) and once for the combined
//! entity after both have returned.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::partnership::{CombinedEntity, Company, FitScore, Opportunity};

/// What is being scored.
#[derive(Debug, Clone, Copy)]
pub enum ScoringSubject<'a> {
    Company(&'a Company),
    Combined(&'a CombinedEntity),
}

impl ScoringSubject<'_> {
    /// Display name used in logs and error details.
    pub fn name(&self) -> &str {
        match self {
            ScoringSubject::Company(company) => &company.name,
            ScoringSubject::Combined(entity) => &entity.name,
        }
    }
}

/// Scores an entity against an opportunity.
#[async_trait]
pub trait FitScorer: Send + Sync {
    async fn score(
        &self,
        subject: ScoringSubject<'_>,
        opportunity: &Opportunity,
    ) -> Result<FitScore, DomainError>;
}
