//! Partnership Module - Pure domain services for partnership lift analysis.
//!
//! Given two independently scored companies and an opportunity, these
//! services decide whether partnering beats going alone, split the credit
//! between the partners, and propose how to run the partnership.
//!
//! # Components
//!
//! - `EntityCombinator` - Merges two company profiles into a combined entity
//! - `LiftCalculator` - Lift over the better partner, per-dimension and
//!   per-requirement
//! - `ContributionAnalyzer` - Shapley attribution, fairness, revenue sharing
//!   and stability
//! - `StrategyGenerator` - Structure, governance, phases and verdict
//!
//! Every service here is stateless and free of I/O. Scoring, lookup and
//! persistence sit behind ports and are driven by the application layer.

mod analysis;
mod company;
mod contribution_analyzer;
mod entity_combinator;
mod fit_score;
mod lift_calculator;
mod opportunity;
mod strategy_generator;
pub mod tiers;

pub use analysis::{
    AnalysisMetadata, AnalysisScores, Confidence, PartnershipLiftAnalysis,
    PartnershipRecommendation,
};
pub use company::{Capability, CapabilityLevel, Company, SizeCategory};
pub use contribution_analyzer::{
    ContributionAnalysis, ContributionAnalyzer, ContributionInputs, ContributionResult,
    FairnessAssessment, KeyContribution, KeyContributionKind, LeadingParty, RequirementContribution,
    RevenueModel, RevenueSharing, RevenueSharingOptions, StabilityAnalysis, StabilityAssessment,
    DEFAULT_SYNERGY_BONUS_FRACTION, STABILITY_PENALTY, STABILITY_RESTRUCTURE_THRESHOLD,
};
pub use entity_combinator::{CapabilitySource, CombinedEntity, EntityCombinator, MergedCapability};
pub use fit_score::{FitScore, ScoreDimension, ScoreTotals};
pub use lift_calculator::{
    DimensionLift, ImpactLevel, LiftCalculator, LiftResult, RequirementImprovement,
    DEFAULT_PASS_THRESHOLD,
};
pub use opportunity::{Opportunity, Requirement};
pub use strategy_generator::{
    ExpectedRoi, GovernanceModel, GovernanceType, ImplementationPhase, RevenueProposal,
    RiskMitigation, Strategy, StrategyGenerator, StrategyRecommendation,
};
pub use tiers::{
    CoordinationRisk, ImbalanceLevel, PartnershipStructure, RecommendationVerdict, SynergyCategory,
};
