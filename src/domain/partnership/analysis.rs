//! Consolidated result of one partnership lift analysis.

use serde::{Deserialize, Serialize};

use super::lift_calculator::RequirementImprovement;
use super::{
    CombinedEntity, ContributionAnalysis, FitScore, LiftResult, RecommendationVerdict, Strategy,
};
use crate::domain::foundation::{AnalysisId, CompanyId, OpportunityId, Timestamp};

/// Fairness score at or above which a stable split counts as high confidence.
const HIGH_CONFIDENCE_FAIRNESS: f64 = 70.0;

/// Identifies the run and its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub analysis_id: AnalysisId,
    pub company_a_id: CompanyId,
    pub company_b_id: CompanyId,
    pub opportunity_id: OpportunityId,
    pub company_a_name: String,
    pub company_b_name: String,
    pub opportunity_title: String,
    pub analyzed_at: Timestamp,
    pub duration_ms: u64,
    pub engine_version: String,
}

/// The three raw fit scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScores {
    pub company_a: FitScore,
    pub company_b: FitScore,
    pub combined: FitScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Headline answer: partner or not, and how sure we are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipRecommendation {
    pub verdict: RecommendationVerdict,
    pub should_partner: bool,
    pub confidence: Confidence,
    pub summary: String,
}

impl PartnershipRecommendation {
    /// Derives the headline from the strategy verdict, tempered by how
    /// stable and fair the contribution split is.
    pub fn from_results(
        metadata: &AnalysisMetadata,
        lift: &LiftResult,
        contributions: &ContributionAnalysis,
        strategy: &Strategy,
    ) -> Self {
        let verdict = strategy.recommendation.verdict;
        let stability = &contributions.stability;

        let confidence = if stability.requires_restructuring() {
            Confidence::Low
        } else if stability.is_nash_equilibrium
            && contributions.fairness.fairness_score >= HIGH_CONFIDENCE_FAIRNESS
        {
            Confidence::High
        } else {
            Confidence::Medium
        };

        let should_partner =
            verdict >= RecommendationVerdict::Conditional && !stability.requires_restructuring();

        let summary = format!(
            "{} + {} for '{}': {} ({:.1}% lift, {})",
            metadata.company_a_name,
            metadata.company_b_name,
            metadata.opportunity_title,
            verdict,
            lift.lift_percentage,
            strategy.structure
        );

        Self {
            verdict,
            should_partner,
            confidence,
            summary,
        }
    }
}

/// Everything one analysis produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipLiftAnalysis {
    pub metadata: AnalysisMetadata,
    pub scores: AnalysisScores,
    pub combined_entity: CombinedEntity,
    pub lift: LiftResult,
    pub contributions: ContributionAnalysis,
    pub strategy: Strategy,
    pub recommendation: PartnershipRecommendation,
}

impl PartnershipLiftAnalysis {
    pub fn requirement_improvements(&self) -> &[RequirementImprovement] {
        &self.lift.requirement_improvements
    }
}
