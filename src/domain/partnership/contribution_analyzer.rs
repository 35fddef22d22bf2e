//! Contribution Analyzer - Who brings what to the partnership.
//!
//! Attribution uses the two-player Shapley value: each company gets its
//! standalone score plus half of the synergy. For two players this is the
//! exact Shapley value, since both join orders are equally likely and the
//! synergy is the only term that depends on order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::tiers::IMBALANCE_LADDER;
use super::{
    CapabilityLevel, CapabilitySource, CombinedEntity, Company, FitScore, ImbalanceLevel,
    Opportunity, ScoreTotals,
};
use crate::domain::foundation::{DomainError, ValidationError};

/// Penalty applied to the stability index per party better off alone.
pub const STABILITY_PENALTY: u8 = 50;

/// Stability index below which the partnership should be restructured.
pub const STABILITY_RESTRUCTURE_THRESHOLD: u8 = 50;

/// Default share of revenue reserved as a synergy bonus.
pub const DEFAULT_SYNERGY_BONUS_FRACTION: f64 = 0.10;

/// Number of key contributions listed per company and category.
const KEY_CONTRIBUTION_LIMIT: usize = 3;

/// Shapley attribution of the combined score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionResult {
    pub score_a: f64,
    pub score_b: f64,
    pub combined_score: f64,
    /// combined − score_a − score_b; negative when the partners interfere.
    pub synergy: f64,
    pub contribution_a: f64,
    pub contribution_b: f64,
    pub percentage_a: f64,
    pub percentage_b: f64,
    pub has_negative_synergy: bool,
}

impl ContributionResult {
    /// Absolute gap between the two percentage shares.
    pub fn percentage_gap(&self) -> f64 {
        (self.percentage_a - self.percentage_b).abs()
    }
}

/// Balance of the contribution split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessAssessment {
    /// 0-100, 100 for a perfect 50/50 split.
    pub fairness_score: f64,
    pub percentage_gap: f64,
    pub imbalance_level: ImbalanceLevel,
    /// Name of the larger contributor, `None` on an exact tie.
    pub dominant_partner: Option<String>,
    pub recommendations: Vec<String>,
    pub concerns: Vec<String>,
}

/// Which company scores higher on a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadingParty {
    CompanyA,
    CompanyB,
    Even,
}

/// Attribution of one requirement's share of the combined result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementContribution {
    pub requirement: String,
    pub score_a: Option<f64>,
    pub score_b: Option<f64>,
    pub combined_score: Option<f64>,
    /// Fraction of the total synergy allocated to this requirement.
    pub synergy_weight: f64,
    pub allocated_synergy: f64,
    pub contribution_a: f64,
    pub contribution_b: f64,
    pub leader: LeadingParty,
}

/// Revenue split model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueModel {
    Equal,
    EffortBased,
    #[default]
    ShapleyContribution,
}

impl RevenueModel {
    pub fn label(&self) -> &'static str {
        match self {
            RevenueModel::Equal => "equal",
            RevenueModel::EffortBased => "effort_based",
            RevenueModel::ShapleyContribution => "shapley_contribution",
        }
    }
}

/// Inputs that shape the revenue proposal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueSharingOptions {
    pub model: RevenueModel,
    /// Company A's share of delivery effort in [0, 1]; used by `EffortBased`.
    pub effort_ratio_a: Option<f64>,
    /// Share of total revenue set aside as a synergy bonus, in [0, 0.5].
    pub synergy_bonus_fraction: f64,
}

impl Default for RevenueSharingOptions {
    fn default() -> Self {
        Self {
            model: RevenueModel::ShapleyContribution,
            effort_ratio_a: None,
            synergy_bonus_fraction: DEFAULT_SYNERGY_BONUS_FRACTION,
        }
    }
}

/// Proposed revenue split. All shares are percentages of total revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSharing {
    pub model: RevenueModel,
    pub base_share_a: f64,
    pub base_share_b: f64,
    /// Bonus pool, 0 when there is no positive synergy.
    pub synergy_bonus_pool: f64,
    pub synergy_bonus_a: f64,
    pub synergy_bonus_b: f64,
    pub final_share_a: f64,
    pub final_share_b: f64,
    pub rationale: String,
}

/// Outcome class of the incentive check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityAssessment {
    Stable,
    Renegotiate,
    RestructureOrAbandon,
}

/// Whether each partner is better off inside the partnership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityAnalysis {
    pub outside_option_a: f64,
    pub outside_option_b: f64,
    pub incentive_a: f64,
    pub incentive_b: f64,
    /// 0, 50 or 100.
    pub stability_index: u8,
    pub is_nash_equilibrium: bool,
    pub assessment: StabilityAssessment,
    pub message: String,
}

impl StabilityAnalysis {
    pub fn requires_restructuring(&self) -> bool {
        self.stability_index < STABILITY_RESTRUCTURE_THRESHOLD
    }
}

/// Kind of item in a key-contribution list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyContributionKind {
    Requirement,
    Capability,
}

/// Something a company specifically brings to the partnership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyContribution {
    pub kind: KeyContributionKind,
    pub area: String,
    pub detail: String,
}

/// Everything the contribution stage produces for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionAnalysis {
    pub shapley: ContributionResult,
    pub fairness: FairnessAssessment,
    pub requirement_contributions: Vec<RequirementContribution>,
    pub revenue_sharing: RevenueSharing,
    pub stability: StabilityAnalysis,
    pub key_contributions_a: Vec<KeyContribution>,
    pub key_contributions_b: Vec<KeyContribution>,
}

/// Borrowed inputs for a full contribution analysis.
#[derive(Debug, Clone, Copy)]
pub struct ContributionInputs<'a> {
    pub company_a: &'a Company,
    pub company_b: &'a Company,
    pub combined_entity: &'a CombinedEntity,
    pub opportunity: &'a Opportunity,
    pub score_a: &'a FitScore,
    pub score_b: &'a FitScore,
    pub combined_score: &'a FitScore,
}

/// Analyzer for contribution attribution, fairness and stability.
pub struct ContributionAnalyzer;

impl ContributionAnalyzer {
    /// Runs every contribution computation. Outside options default to each
    /// company's standalone score.
    pub fn analyze(
        inputs: &ContributionInputs<'_>,
        options: &RevenueSharingOptions,
    ) -> Result<ContributionAnalysis, DomainError> {
        let shapley =
            Self::calculate_shapley_values(inputs.score_a, inputs.score_b, inputs.combined_score)?;
        let fairness =
            Self::analyze_contribution_fairness(&shapley, inputs.company_a, inputs.company_b);
        let requirement_contributions = Self::calculate_detailed_contributions(
            &shapley,
            inputs.score_a,
            inputs.score_b,
            inputs.combined_score,
            inputs.opportunity,
        );
        let revenue_sharing = Self::calculate_revenue_sharing(&shapley, options)?;
        let stability =
            Self::analyze_game_theory_stability(
                &shapley,
                inputs.company_a,
                inputs.company_b,
                shapley.score_a,
                shapley.score_b,
            );

        let key_contributions_a = Self::key_contributions(
            &requirement_contributions,
            inputs.combined_entity,
            LeadingParty::CompanyA,
        );
        let key_contributions_b = Self::key_contributions(
            &requirement_contributions,
            inputs.combined_entity,
            LeadingParty::CompanyB,
        );

        Ok(ContributionAnalysis {
            shapley,
            fairness,
            requirement_contributions,
            revenue_sharing,
            stability,
            key_contributions_a,
            key_contributions_b,
        })
    }

    /// Two-player Shapley values for the combined score.
    ///
    /// # Errors
    /// `InvalidInput` when any record lacks a finite total.
    ///
    /// # Edge Cases
    /// - Combined score 0: percentages fall back to 50/50
    /// - Negative synergy: split equally like positive synergy, flagged
    pub fn calculate_shapley_values(
        score_a: &FitScore,
        score_b: &FitScore,
        combined: &FitScore,
    ) -> Result<ContributionResult, DomainError> {
        let totals = ScoreTotals::from_scores(Some(score_a), Some(score_b), Some(combined))?;
        Ok(Self::shapley_from_totals(&totals))
    }

    /// Shapley values from already validated totals.
    pub fn shapley_from_totals(totals: &ScoreTotals) -> ContributionResult {
        let synergy = totals.combined - (totals.a + totals.b);
        let contribution_a = totals.a + synergy / 2.0;
        let contribution_b = totals.b + synergy / 2.0;

        let (percentage_a, percentage_b) = if totals.combined == 0.0 {
            (50.0, 50.0)
        } else {
            (
                contribution_a / totals.combined * 100.0,
                contribution_b / totals.combined * 100.0,
            )
        };

        ContributionResult {
            score_a: totals.a,
            score_b: totals.b,
            combined_score: totals.combined,
            synergy,
            contribution_a,
            contribution_b,
            percentage_a,
            percentage_b,
            has_negative_synergy: synergy < 0.0,
        }
    }

    /// Scores how evenly the contribution is split.
    ///
    /// `fairness = 100 − 1.5 × |pct_a − pct_b|`, clamped to [0, 100].
    pub fn analyze_contribution_fairness(
        contribution: &ContributionResult,
        company_a: &Company,
        company_b: &Company,
    ) -> FairnessAssessment {
        let gap = contribution.percentage_gap();
        let fairness_score = Self::fairness_score(gap);
        let imbalance_level = IMBALANCE_LADDER.classify(gap);

        let (dominant, weaker) = match contribution
            .percentage_a
            .partial_cmp(&contribution.percentage_b)
        {
            Some(Ordering::Greater) => (Some(company_a.name.as_str()), company_b.name.as_str()),
            Some(Ordering::Less) => (Some(company_b.name.as_str()), company_a.name.as_str()),
            _ => (None, "either partner"),
        };
        let lead = dominant.unwrap_or("either partner");

        let (recommendations, concerns) = fairness_guidance(imbalance_level, lead, weaker);

        FairnessAssessment {
            fairness_score,
            percentage_gap: gap,
            imbalance_level,
            dominant_partner: dominant.map(str::to_string),
            recommendations,
            concerns,
        }
    }

    /// Fairness score for a percentage-point gap.
    pub fn fairness_score(gap: f64) -> f64 {
        (100.0 - 1.5 * gap.abs()).clamp(0.0, 100.0)
    }

    /// Spreads the synergy across requirements.
    ///
    /// Each requirement's weight is its share of the combined per-requirement
    /// total; with no combined breakdown (or an all-zero one) every
    /// requirement gets an equal weight. A company without a score for a
    /// requirement contributes nothing to it beyond its synergy half.
    pub fn calculate_detailed_contributions(
        contribution: &ContributionResult,
        score_a: &FitScore,
        score_b: &FitScore,
        combined: &FitScore,
        opportunity: &Opportunity,
    ) -> Vec<RequirementContribution> {
        let requirements = &opportunity.requirements;
        if requirements.is_empty() {
            return Vec::new();
        }

        let combined_total: f64 = requirements
            .iter()
            .filter_map(|r| combined.requirement_score(&r.name))
            .sum();
        let equal_weight = 1.0 / requirements.len() as f64;

        requirements
            .iter()
            .map(|req| {
                let a = score_a.requirement_score(&req.name);
                let b = score_b.requirement_score(&req.name);
                let c = combined.requirement_score(&req.name);

                let synergy_weight = if combined_total > 0.0 {
                    c.unwrap_or(0.0) / combined_total
                } else {
                    equal_weight
                };
                let allocated_synergy = contribution.synergy * synergy_weight;

                let (va, vb) = (a.unwrap_or(0.0), b.unwrap_or(0.0));
                let leader = match va.partial_cmp(&vb) {
                    Some(Ordering::Greater) => LeadingParty::CompanyA,
                    Some(Ordering::Less) => LeadingParty::CompanyB,
                    _ => LeadingParty::Even,
                };

                RequirementContribution {
                    requirement: req.name.clone(),
                    score_a: a,
                    score_b: b,
                    combined_score: c,
                    synergy_weight,
                    allocated_synergy,
                    contribution_a: va + allocated_synergy / 2.0,
                    contribution_b: vb + allocated_synergy / 2.0,
                    leader,
                }
            })
            .collect()
    }

    /// Proposes a revenue split under the chosen model.
    ///
    /// Base shares come from the model. When synergy is positive, a bonus
    /// pool of `synergy_bonus_fraction` of revenue is split 50/50 and the
    /// base shares scale into the remainder. Final shares sum to 100.
    ///
    /// # Errors
    /// `InvalidInput` for an effort ratio outside [0, 1], a missing effort
    /// ratio under `EffortBased`, or a bonus fraction outside [0, 0.5].
    pub fn calculate_revenue_sharing(
        contribution: &ContributionResult,
        options: &RevenueSharingOptions,
    ) -> Result<RevenueSharing, DomainError> {
        let bonus_fraction = options.synergy_bonus_fraction;
        if !bonus_fraction.is_finite() || !(0.0..=0.5).contains(&bonus_fraction) {
            return Err(ValidationError::out_of_range(
                "synergy_bonus_fraction",
                0.0,
                0.5,
                bonus_fraction,
            )
            .into());
        }

        let (base_a, base_b, rationale) = match options.model {
            RevenueModel::Equal => (
                50.0,
                50.0,
                "Equal split regardless of individual contribution".to_string(),
            ),
            RevenueModel::EffortBased => {
                let ratio = options.effort_ratio_a.ok_or_else(|| {
                    DomainError::invalid_input(
                        "effort_ratio_a",
                        "Effort-based revenue sharing requires an effort ratio",
                    )
                })?;
                if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
                    return Err(
                        ValidationError::out_of_range("effort_ratio_a", 0.0, 1.0, ratio).into(),
                    );
                }
                (
                    ratio * 100.0,
                    (1.0 - ratio) * 100.0,
                    format!(
                        "Split follows committed delivery effort ({:.0}/{:.0})",
                        ratio * 100.0,
                        (1.0 - ratio) * 100.0
                    ),
                )
            }
            RevenueModel::ShapleyContribution => {
                let (a, b) = normalized_shares(contribution.percentage_a, contribution.percentage_b);
                (
                    a,
                    b,
                    format!(
                        "Split follows Shapley contribution ({:.1}% / {:.1}%)",
                        a, b
                    ),
                )
            }
        };

        let pool = if contribution.synergy > 0.0 {
            bonus_fraction * 100.0
        } else {
            0.0
        };
        let scale = (100.0 - pool) / 100.0;
        let bonus_each = pool / 2.0;

        Ok(RevenueSharing {
            model: options.model,
            base_share_a: base_a,
            base_share_b: base_b,
            synergy_bonus_pool: pool,
            synergy_bonus_a: bonus_each,
            synergy_bonus_b: bonus_each,
            final_share_a: base_a * scale + bonus_each,
            final_share_b: base_b * scale + bonus_each,
            rationale,
        })
    }

    /// Checks that each partner does at least as well inside the
    /// partnership as with its outside option.
    pub fn analyze_game_theory_stability(
        contribution: &ContributionResult,
        company_a: &Company,
        company_b: &Company,
        outside_option_a: f64,
        outside_option_b: f64,
    ) -> StabilityAnalysis {
        let incentive_a = contribution.contribution_a - outside_option_a;
        let incentive_b = contribution.contribution_b - outside_option_b;

        let defectors = [incentive_a, incentive_b]
            .iter()
            .filter(|i| **i < 0.0)
            .count() as u8;
        let stability_index = 100 - STABILITY_PENALTY * defectors;
        let is_nash_equilibrium = incentive_a >= 0.0 && incentive_b >= 0.0;

        let (assessment, message) = if stability_index == 100 {
            (
                StabilityAssessment::Stable,
                "Both partners gain more together than alone; the partnership is self-enforcing"
                    .to_string(),
            )
        } else if stability_index >= STABILITY_RESTRUCTURE_THRESHOLD {
            let party = if incentive_a < 0.0 {
                &company_a.name
            } else {
                &company_b.name
            };
            (
                StabilityAssessment::Renegotiate,
                format!(
                    "{} would do better alone; renegotiate terms to keep it engaged",
                    party
                ),
            )
        } else {
            (
                StabilityAssessment::RestructureOrAbandon,
                "Neither partner gains from the partnership; restructure or abandon it"
                    .to_string(),
            )
        };

        StabilityAnalysis {
            outside_option_a,
            outside_option_b,
            incentive_a,
            incentive_b,
            stability_index,
            is_nash_equilibrium,
            assessment,
            message,
        }
    }

    /// What `party` specifically brings: requirements it leads (largest
    /// margin first) and its strongest exclusive capabilities.
    pub fn key_contributions(
        requirement_contributions: &[RequirementContribution],
        combined_entity: &CombinedEntity,
        party: LeadingParty,
    ) -> Vec<KeyContribution> {
        let source = match party {
            LeadingParty::CompanyA => CapabilitySource::CompanyA,
            LeadingParty::CompanyB => CapabilitySource::CompanyB,
            LeadingParty::Even => CapabilitySource::Both,
        };

        let mut led: Vec<(&RequirementContribution, f64)> = requirement_contributions
            .iter()
            .filter(|rc| rc.leader == party)
            .map(|rc| {
                let margin = (rc.score_a.unwrap_or(0.0) - rc.score_b.unwrap_or(0.0)).abs();
                (rc, margin)
            })
            .collect();
        led.sort_by(|x, y| y.1.partial_cmp(&x.1).unwrap_or(Ordering::Equal));

        let mut out: Vec<KeyContribution> = led
            .into_iter()
            .take(KEY_CONTRIBUTION_LIMIT)
            .map(|(rc, margin)| KeyContribution {
                kind: KeyContributionKind::Requirement,
                area: rc.requirement.clone(),
                detail: format!("Leads by {:.1} points", margin),
            })
            .collect();

        let mut caps: Vec<_> = combined_entity
            .capabilities_from(source)
            .filter(|c| c.level >= CapabilityLevel::High)
            .collect();
        caps.sort_by(|x, y| y.level.cmp(&x.level));
        out.extend(caps.into_iter().take(KEY_CONTRIBUTION_LIMIT).map(|c| KeyContribution {
            kind: KeyContributionKind::Capability,
            area: c.name.clone(),
            detail: format!("Brings {} capability", c.level),
        }));

        out
    }
}

/// Clamps negative shares to zero and rescales to 100; 50/50 if nothing
/// positive remains.
fn normalized_shares(pct_a: f64, pct_b: f64) -> (f64, f64) {
    let (a, b) = (pct_a.max(0.0), pct_b.max(0.0));
    let sum = a + b;
    if sum <= 0.0 || !sum.is_finite() {
        (50.0, 50.0)
    } else {
        (a / sum * 100.0, b / sum * 100.0)
    }
}

fn fairness_guidance(level: ImbalanceLevel, lead: &str, weaker: &str) -> (Vec<String>, Vec<String>) {
    match level {
        ImbalanceLevel::None => (
            vec![
                "Contributions are evenly balanced; an equal partnership is appropriate".to_string(),
                "Share governance seats and decision rights equally".to_string(),
            ],
            Vec::new(),
        ),
        ImbalanceLevel::Low => (
            vec![
                "Minor contribution difference; a small revenue adjustment is sufficient"
                    .to_string(),
                "Document each partner's responsibilities so the balance stays visible"
                    .to_string(),
            ],
            Vec::new(),
        ),
        ImbalanceLevel::Moderate => (
            vec![
                "Align revenue sharing with the contribution split".to_string(),
                format!("Give {} the lead on the workstreams it drives", lead),
            ],
            Vec::new(),
        ),
        ImbalanceLevel::High => (
            vec![
                format!(
                    "Consider a prime-subcontractor arrangement with {} as prime",
                    lead
                ),
                "Tie revenue share to measured delivery contribution".to_string(),
            ],
            vec![
                format!("{} may be perceived as a junior partner", weaker),
                "Misaligned incentives if revenue is split evenly".to_string(),
            ],
        ),
        ImbalanceLevel::Significant => (
            vec![
                format!(
                    "Structure {} as prime contractor with {} as specialist subcontractor",
                    lead, weaker
                ),
                format!(
                    "Re-evaluate whether {}'s contribution justifies a formal partnership",
                    weaker
                ),
                format!("Define explicit value-add milestones for {}", weaker),
            ],
            vec![
                format!("Contribution is heavily concentrated in {}", lead),
                format!("{} adds limited incremental value", weaker),
                "Partnership may not be sustainable without rebalancing".to_string(),
            ],
        ),
    }
}
