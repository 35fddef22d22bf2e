//! Fit scorer returning preconfigured scores.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::{CompanyId, DomainError};
use crate::domain::partnership::{FitScore, Opportunity};
use crate::ports::{FitScorer, ScoringSubject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ScoreKey {
    Company(CompanyId),
    /// Parent ids, sorted so either pairing order finds the same score.
    Combined(CompanyId, CompanyId),
}

impl ScoreKey {
    fn combined(a: CompanyId, b: CompanyId) -> Self {
        if a <= b {
            ScoreKey::Combined(a, b)
        } else {
            ScoreKey::Combined(b, a)
        }
    }

    fn for_subject(subject: &ScoringSubject<'_>) -> Self {
        match subject {
            ScoringSubject::Company(company) => ScoreKey::Company(company.id),
            ScoringSubject::Combined(entity) => {
                Self::combined(entity.parent_ids[0], entity.parent_ids[1])
            }
        }
    }
}

/// Scorer with a fixed table of results.
///
/// Scores ignore the opportunity. Subjects without an entry fail with
/// `UpstreamScoringFailure`.
#[derive(Debug, Clone, Default)]
pub struct StaticFitScorer {
    scores: HashMap<ScoreKey, FitScore>,
}

impl StaticFitScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company_score(mut self, company_id: CompanyId, score: FitScore) -> Self {
        self.scores.insert(ScoreKey::Company(company_id), score);
        self
    }

    /// Score for the entity combining `a` and `b`, in either order.
    pub fn with_combined_score(mut self, a: CompanyId, b: CompanyId, score: FitScore) -> Self {
        self.scores.insert(ScoreKey::combined(a, b), score);
        self
    }
}

#[async_trait]
impl FitScorer for StaticFitScorer {
    async fn score(
        &self,
        subject: ScoringSubject<'_>,
        _opportunity: &Opportunity,
    ) -> Result<FitScore, DomainError> {
        self.scores
            .get(&ScoreKey::for_subject(&subject))
            .cloned()
            .ok_or_else(|| DomainError::scoring_failure(subject.name(), "No score configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::partnership::{Company, EntityCombinator};

    #[tokio::test]
    async fn combined_score_matches_either_order() {
        let a = Company::new("Acme");
        let b = Company::new("Globex");
        let scorer = StaticFitScorer::new().with_combined_score(b.id, a.id, FitScore::new(80.0));
        let entity = EntityCombinator::create_combined_entity(&a, &b);

        let score = scorer
            .score(ScoringSubject::Combined(&entity), &Opportunity::new("Pilot"))
            .await
            .unwrap();

        assert_eq!(score.total_score, Some(80.0));
    }

    #[tokio::test]
    async fn unknown_subject_fails_upstream() {
        let scorer = StaticFitScorer::new();
        let company = Company::new("Initech");

        let err = scorer
            .score(ScoringSubject::Company(&company), &Opportunity::new("Pilot"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UpstreamScoringFailure);
        assert_eq!(err.details.get("subject").map(String::as_str), Some("Initech"));
    }
}
