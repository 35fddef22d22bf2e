//! Lift Calculator - How much a partnership improves on going alone.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::tiers::{COORDINATION_RISK_LADDER, SYNERGY_LADDER};
use super::{CoordinationRisk, FitScore, Opportunity, ScoreDimension, ScoreTotals, SynergyCategory};
use crate::domain::foundation::DomainError;

/// Per-requirement score at or above which a requirement counts as met.
pub const DEFAULT_PASS_THRESHOLD: f64 = 70.0;

/// Severity of a requirement that the partnership newly satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    /// One company already met the requirement alone.
    Moderate,
    /// Neither company met it alone; only the partnership does.
    Critical,
}

/// A requirement whose pass/fail outcome improves under the partnership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementImprovement {
    pub requirement: String,
    pub weight: f64,
    pub score_a: f64,
    pub score_b: f64,
    pub best_individual: f64,
    pub combined_score: f64,
    pub improvement: f64,
    pub impact: ImpactLevel,
}

/// Lift measured on a single scoring dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionLift {
    pub dimension: ScoreDimension,
    pub baseline: f64,
    pub combined_score: f64,
    pub lift_amount: f64,
    pub lift_percentage: f64,
    pub synergy_category: SynergyCategory,
}

/// Outcome of comparing the combined entity against the better partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftResult {
    pub score_a: f64,
    pub score_b: f64,
    /// max(score_a, score_b)
    pub baseline: f64,
    pub combined_score: f64,
    pub lift_amount: f64,
    pub lift_percentage: f64,
    pub synergy_category: SynergyCategory,
    pub coordination_risk: CoordinationRisk,
    #[serde(default)]
    pub dimension_breakdown: Vec<DimensionLift>,
    #[serde(default)]
    pub requirement_improvements: Vec<RequirementImprovement>,
}

impl LiftResult {
    /// True when the partnership beats the better standalone company.
    pub fn has_positive_lift(&self) -> bool {
        self.lift_amount > 0.0
    }

    /// Number of requirements only the partnership can meet.
    pub fn critical_improvement_count(&self) -> usize {
        self.requirement_improvements
            .iter()
            .filter(|i| i.impact == ImpactLevel::Critical)
            .count()
    }
}

/// Calculator for partnership lift.
pub struct LiftCalculator;

impl LiftCalculator {
    /// Computes lift of the combined entity over the better partner.
    ///
    /// `lift_percentage` is defined as 0 when the baseline is 0. The
    /// per-dimension breakdown is filled in when breakdown data exists;
    /// requirement improvements need the opportunity, see
    /// [`LiftCalculator::analyze`].
    ///
    /// # Errors
    /// `InvalidInput` when any record lacks a finite total.
    pub fn calculate_lift(
        score_a: &FitScore,
        score_b: &FitScore,
        combined: &FitScore,
    ) -> Result<LiftResult, DomainError> {
        let totals = ScoreTotals::from_scores(Some(score_a), Some(score_b), Some(combined))?;
        let baseline = totals.baseline();
        let lift_amount = totals.combined - baseline;
        let lift_percentage = Self::lift_percentage(baseline, lift_amount);

        Ok(LiftResult {
            score_a: totals.a,
            score_b: totals.b,
            baseline,
            combined_score: totals.combined,
            lift_amount,
            lift_percentage,
            synergy_category: SYNERGY_LADDER.classify(lift_percentage),
            coordination_risk: COORDINATION_RISK_LADDER.classify(lift_percentage),
            dimension_breakdown: Self::calculate_synergy_breakdown(score_a, score_b, combined),
            requirement_improvements: Vec::new(),
        })
    }

    /// Full lift analysis including requirement improvements.
    pub fn analyze(
        score_a: &FitScore,
        score_b: &FitScore,
        combined: &FitScore,
        opportunity: &Opportunity,
        pass_threshold: f64,
    ) -> Result<LiftResult, DomainError> {
        let mut result = Self::calculate_lift(score_a, score_b, combined)?;
        result.requirement_improvements = Self::identify_requirement_improvements(
            score_a,
            score_b,
            combined,
            opportunity,
            pass_threshold,
        );
        Ok(result)
    }

    /// Relative lift in percent; 0 when the baseline is 0.
    pub fn lift_percentage(baseline: f64, lift_amount: f64) -> f64 {
        if baseline == 0.0 {
            0.0
        } else {
            lift_amount / baseline * 100.0
        }
    }

    /// Requirements the partnership passes that at least one partner fails.
    ///
    /// Requirements missing a score in any of the three records are skipped.
    /// Results are ordered critical first, then by improvement over the
    /// best individual score.
    pub fn identify_requirement_improvements(
        score_a: &FitScore,
        score_b: &FitScore,
        combined: &FitScore,
        opportunity: &Opportunity,
        pass_threshold: f64,
    ) -> Vec<RequirementImprovement> {
        let mut improvements: Vec<RequirementImprovement> = opportunity
            .requirements
            .iter()
            .filter_map(|req| {
                let a = score_a.requirement_score(&req.name)?;
                let b = score_b.requirement_score(&req.name)?;
                let c = combined.requirement_score(&req.name)?;

                if c < pass_threshold {
                    return None;
                }

                let impact = match (a >= pass_threshold, b >= pass_threshold) {
                    (false, false) => ImpactLevel::Critical,
                    (true, false) | (false, true) => ImpactLevel::Moderate,
                    (true, true) => return None,
                };

                let best_individual = a.max(b);
                Some(RequirementImprovement {
                    requirement: req.name.clone(),
                    weight: req.weight,
                    score_a: a,
                    score_b: b,
                    best_individual,
                    combined_score: c,
                    improvement: c - best_individual,
                    impact,
                })
            })
            .collect();

        improvements.sort_by(|x, y| {
            y.impact.cmp(&x.impact).then_with(|| {
                y.improvement
                    .partial_cmp(&x.improvement)
                    .unwrap_or(Ordering::Equal)
            })
        });

        improvements
    }

    /// Lift per scoring dimension.
    ///
    /// A dimension is skipped unless all three records carry it.
    pub fn calculate_synergy_breakdown(
        score_a: &FitScore,
        score_b: &FitScore,
        combined: &FitScore,
    ) -> Vec<DimensionLift> {
        ScoreDimension::ALL
            .iter()
            .filter_map(|&dimension| {
                let a = score_a.dimension_score(dimension)?;
                let b = score_b.dimension_score(dimension)?;
                let c = combined.dimension_score(dimension)?;

                let baseline = a.max(b);
                let lift_amount = c - baseline;
                let lift_percentage = Self::lift_percentage(baseline, lift_amount);

                Some(DimensionLift {
                    dimension,
                    baseline,
                    combined_score: c,
                    lift_amount,
                    lift_percentage,
                    synergy_category: SYNERGY_LADDER.classify(lift_percentage),
                })
            })
            .collect()
    }
}
