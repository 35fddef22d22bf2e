//! Strategy Generator - Turns the numbers into a partnership plan.

use serde::{Deserialize, Serialize};

use super::lift_calculator::{ImpactLevel, LiftResult, RequirementImprovement};
use super::tiers::{STRUCTURE_LADDER, VERDICT_LADDER};
use super::{
    Company, ContributionResult, CoordinationRisk, PartnershipStructure, RecommendationVerdict,
    RevenueModel, RevenueSharing,
};

/// Size bands apart before the partners count as mismatched.
const SIZE_MISMATCH_DISTANCE: u8 = 2;

/// How the partnership is run day to day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceType {
    SteeringCommittee,
    JointManagementTeam,
    CoordinationCouncil,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceModel {
    pub governance_type: GovernanceType,
    pub description: String,
    pub role_split: String,
    pub meeting_cadence: String,
}

/// Final shares from the revenue-sharing calculation, bonus included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueProposal {
    pub model: RevenueModel,
    pub share_a: f64,
    pub share_b: f64,
    pub synergy_bonus_pool: f64,
    pub synergy_bonus_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMitigation {
    pub risk: String,
    pub mitigation: String,
}

impl RiskMitigation {
    fn new(risk: impl Into<String>, mitigation: impl Into<String>) -> Self {
        Self {
            risk: risk.into(),
            mitigation: mitigation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationPhase {
    pub order: u8,
    pub name: String,
    pub duration_weeks: u32,
    pub deliverables: Vec<String>,
}

/// Qualitative return expected from the partnership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedRoi {
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    pub verdict: RecommendationVerdict,
    pub rationale: String,
    pub expected_roi: ExpectedRoi,
    pub time_to_value: String,
}

/// Complete partnership strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub structure: PartnershipStructure,
    pub structure_rationale: String,
    pub governance: GovernanceModel,
    pub revenue_sharing: RevenueProposal,
    pub success_factors: Vec<String>,
    pub risk_mitigations: Vec<RiskMitigation>,
    pub implementation_phases: Vec<ImplementationPhase>,
    pub total_timeline_weeks: u32,
    pub recommendation: StrategyRecommendation,
}

/// Generator for partnership strategies.
pub struct StrategyGenerator;

impl StrategyGenerator {
    /// Builds a strategy consistent with the lift and contribution results.
    pub fn generate_partnership_strategy(
        company_a: &Company,
        company_b: &Company,
        lift: &LiftResult,
        requirement_improvements: &[RequirementImprovement],
        contribution: &ContributionResult,
        revenue: &RevenueSharing,
    ) -> Strategy {
        let structure = Self::select_structure(lift.lift_percentage);
        let critical: Vec<&str> = requirement_improvements
            .iter()
            .filter(|i| i.impact == ImpactLevel::Critical)
            .map(|i| i.requirement.as_str())
            .collect();

        let implementation_phases = Self::implementation_phases(structure);
        let total_timeline_weeks = implementation_phases.iter().map(|p| p.duration_weeks).sum();

        Strategy {
            structure,
            structure_rationale: Self::structure_rationale(structure, lift.lift_percentage),
            governance: Self::governance_model(structure, company_a, company_b, contribution),
            revenue_sharing: Self::revenue_proposal(contribution, revenue),
            success_factors: Self::success_factors(
                structure,
                &critical,
                lift.coordination_risk,
                company_a,
                company_b,
            ),
            risk_mitigations: Self::risk_mitigations(
                structure,
                &critical,
                lift.coordination_risk,
                contribution,
                company_a,
                company_b,
            ),
            implementation_phases,
            total_timeline_weeks,
            recommendation: Self::final_recommendation(lift, structure, critical.len()),
        }
    }

    /// Structure for a lift percentage.
    pub fn select_structure(lift_percentage: f64) -> PartnershipStructure {
        STRUCTURE_LADDER.classify(lift_percentage)
    }

    /// Verdict for a lift percentage.
    pub fn select_verdict(lift_percentage: f64) -> RecommendationVerdict {
        VERDICT_LADDER.classify(lift_percentage)
    }

    fn structure_rationale(structure: PartnershipStructure, lift: f64) -> String {
        match structure {
            PartnershipStructure::JointVenture => format!(
                "A {:.1}% lift signals deep complementarity that justifies a jointly owned entity",
                lift
            ),
            PartnershipStructure::StrategicAlliance => format!(
                "A {:.1}% lift supports a long-term alliance across multiple pursuits",
                lift
            ),
            PartnershipStructure::PrimeSubcontractor => format!(
                "A {:.1}% lift warrants a prime-subcontractor arrangement with clear scope ownership",
                lift
            ),
            PartnershipStructure::TeamingAgreement => format!(
                "A {:.1}% lift is enough for a teaming agreement scoped to this opportunity",
                lift
            ),
            PartnershipStructure::ReferralOnly => format!(
                "A {:.1}% lift does not justify joint delivery; a referral arrangement keeps the option open",
                lift
            ),
        }
    }

    fn governance_model(
        structure: PartnershipStructure,
        company_a: &Company,
        company_b: &Company,
        contribution: &ContributionResult,
    ) -> GovernanceModel {
        let split = format!(
            "{} {:.1}% / {} {:.1}%",
            company_a.name, contribution.percentage_a, company_b.name, contribution.percentage_b
        );

        match structure {
            PartnershipStructure::JointVenture | PartnershipStructure::StrategicAlliance => {
                GovernanceModel {
                    governance_type: GovernanceType::SteeringCommittee,
                    description: "Joint steering committee with executive representation from both partners"
                        .to_string(),
                    role_split: format!("Voting weight mirrors contribution: {}", split),
                    meeting_cadence: "Monthly steering, quarterly executive review".to_string(),
                }
            }
            PartnershipStructure::PrimeSubcontractor | PartnershipStructure::TeamingAgreement => {
                GovernanceModel {
                    governance_type: GovernanceType::JointManagementTeam,
                    description: "Joint management team led by the larger contributor".to_string(),
                    role_split: format!("Workstream ownership follows contribution: {}", split),
                    meeting_cadence: "Bi-weekly delivery review".to_string(),
                }
            }
            PartnershipStructure::ReferralOnly => GovernanceModel {
                governance_type: GovernanceType::CoordinationCouncil,
                description: "Lightweight coordination council for lead exchange".to_string(),
                role_split: format!("Referral credit tracked against contribution: {}", split),
                meeting_cadence: "Quarterly check-in".to_string(),
            },
        }
    }

    fn revenue_proposal(contribution: &ContributionResult, revenue: &RevenueSharing) -> RevenueProposal {
        let synergy_bonus_note = if revenue.synergy_bonus_pool > 0.0 {
            format!(
                "Synergy of {:.1} points funds a {:.1}% bonus pool split equally between the partners",
                contribution.synergy, revenue.synergy_bonus_pool
            )
        } else if contribution.synergy > 0.0 {
            format!(
                "Synergy of {:.1} points; no bonus pool is reserved",
                contribution.synergy
            )
        } else {
            "No positive synergy; no bonus pool is proposed".to_string()
        };

        RevenueProposal {
            model: revenue.model,
            share_a: revenue.final_share_a,
            share_b: revenue.final_share_b,
            synergy_bonus_pool: revenue.synergy_bonus_pool,
            synergy_bonus_note,
        }
    }

    fn success_factors(
        structure: PartnershipStructure,
        critical: &[&str],
        risk: CoordinationRisk,
        company_a: &Company,
        company_b: &Company,
    ) -> Vec<String> {
        let mut factors: Vec<String> = match structure {
            PartnershipStructure::JointVenture => vec![
                "Stand up a jointly owned entity with dedicated leadership".to_string(),
                "Agree capital contributions and exit terms before launch".to_string(),
            ],
            PartnershipStructure::StrategicAlliance => vec![
                "Define a shared go-to-market plan for target accounts".to_string(),
                "Appoint an executive sponsor in each company".to_string(),
            ],
            PartnershipStructure::PrimeSubcontractor => vec![
                "Agree the prime/sub scope split and flow-down terms".to_string(),
                "Integrate delivery tooling early".to_string(),
            ],
            PartnershipStructure::TeamingAgreement => vec![
                "Sign a teaming agreement covering this pursuit".to_string(),
                "Nominate a single bid lead".to_string(),
            ],
            PartnershipStructure::ReferralOnly => {
                vec!["Agree referral fees and lead-handling rules".to_string()]
            }
        };

        if !critical.is_empty() {
            factors.push(format!(
                "Showcase the requirements only the partnership can meet: {}",
                critical.join(", ")
            ));
        }

        match risk {
            CoordinationRisk::High => {
                factors.push("Run an integration management office from day one".to_string())
            }
            CoordinationRisk::Medium => {
                factors.push("Hold weekly cross-team delivery syncs".to_string())
            }
            CoordinationRisk::Low => {}
        }

        if company_a.size.distance(&company_b.size) >= SIZE_MISMATCH_DISTANCE {
            factors.push(
                "Balance decision rights despite the difference in company size".to_string(),
            );
        }
        if company_a.has_geographic_mismatch(company_b) {
            factors.push("Plan a delivery model spanning both partners' regions".to_string());
        }

        factors
    }

    fn risk_mitigations(
        structure: PartnershipStructure,
        critical: &[&str],
        risk: CoordinationRisk,
        contribution: &ContributionResult,
        company_a: &Company,
        company_b: &Company,
    ) -> Vec<RiskMitigation> {
        let mut mitigations = Vec::new();

        if matches!(
            structure,
            PartnershipStructure::JointVenture | PartnershipStructure::StrategicAlliance
        ) {
            mitigations.push(RiskMitigation::new(
                "Integration complexity of a deep partnership",
                "Phase integration and gate each phase on agreed KPIs",
            ));
        }

        if !critical.is_empty() {
            mitigations.push(RiskMitigation::new(
                format!("Losing the capability behind critical gaps: {}", critical.join(", ")),
                "Name key personnel for these requirements in the agreement",
            ));
        }

        match risk {
            CoordinationRisk::High => mitigations.push(RiskMitigation::new(
                "Coordination overhead erodes margin",
                "Fund a joint PMO with shared tooling and reporting",
            )),
            CoordinationRisk::Medium => mitigations.push(RiskMitigation::new(
                "Hand-off delays between teams",
                "Define a RACI and escalation path before kickoff",
            )),
            CoordinationRisk::Low => {}
        }

        if contribution.has_negative_synergy {
            mitigations.push(RiskMitigation::new(
                "Partners interfere on overlapping scope",
                "Assign a single owner per overlapping capability",
            ));
        }

        if company_a.size.distance(&company_b.size) >= SIZE_MISMATCH_DISTANCE {
            mitigations.push(RiskMitigation::new(
                "Larger partner dominates decisions",
                "Contractually protect the smaller partner's scope and IP",
            ));
        }
        if company_a.has_geographic_mismatch(company_b) {
            mitigations.push(RiskMitigation::new(
                "Regional and time-zone delivery gaps",
                "Agree overlap hours and a lead per region",
            ));
        }

        mitigations.push(RiskMitigation::new(
            "Expectations drift over time",
            "Document joint objectives and review them quarterly",
        ));

        mitigations
    }

    fn implementation_phases(structure: PartnershipStructure) -> Vec<ImplementationPhase> {
        let plan: Vec<(&str, u32, Vec<&str>)> = match structure {
            PartnershipStructure::ReferralOnly => vec![
                ("Referral Agreement", 2, vec!["Signed referral terms"]),
                ("Enablement", 2, vec!["Shared capability briefs", "Lead intake process"]),
                ("Review", 4, vec!["Referral pipeline review"]),
            ],
            PartnershipStructure::TeamingAgreement => vec![
                ("Teaming Agreement", 2, vec!["Signed teaming agreement", "Scope matrix"]),
                ("Joint Proposal", 4, vec!["Win themes", "Combined proposal"]),
                ("Delivery Kickoff", 4, vec!["Joint delivery plan"]),
            ],
            PartnershipStructure::PrimeSubcontractor => vec![
                ("Contract & Flow-down", 3, vec!["Subcontract", "Flow-down clauses"]),
                ("Capture & Proposal", 6, vec!["Capture plan", "Combined proposal"]),
                ("Team Integration", 4, vec!["Shared tooling", "RACI"]),
                ("Delivery & Review", 8, vec!["Delivery milestones", "Performance review"]),
            ],
            PartnershipStructure::StrategicAlliance => vec![
                ("Alliance Charter", 4, vec!["Charter", "Executive sponsors"]),
                ("Go-to-Market Planning", 6, vec!["Target account list", "Joint offerings"]),
                ("Capability Integration", 8, vec!["Integrated delivery playbook"]),
                ("Joint Pursuits", 12, vec!["First joint wins", "Alliance scorecard"]),
            ],
            PartnershipStructure::JointVenture => vec![
                ("Term Sheet & Due Diligence", 6, vec!["Term sheet", "Due diligence report"]),
                ("Entity Formation", 8, vec!["Legal entity", "Capitalisation"]),
                ("Capability Integration", 12, vec!["Transferred teams", "Shared platforms"]),
                ("Launch", 8, vec!["Go-to-market launch"]),
                ("Performance Review", 12, vec!["First-year review", "Adjusted operating plan"]),
            ],
        };

        plan.into_iter()
            .enumerate()
            .map(|(i, (name, weeks, deliverables))| ImplementationPhase {
                order: (i + 1) as u8,
                name: name.to_string(),
                duration_weeks: weeks,
                deliverables: deliverables.iter().map(|d| d.to_string()).collect(),
            })
            .collect()
    }

    fn final_recommendation(
        lift: &LiftResult,
        structure: PartnershipStructure,
        critical_count: usize,
    ) -> StrategyRecommendation {
        let verdict = Self::select_verdict(lift.lift_percentage);
        let pct = lift.lift_percentage;
        let critical_note = if critical_count > 0 {
            format!(" and closes {} critical requirement gap(s)", critical_count)
        } else {
            String::new()
        };

        let (rationale, expected_roi, time_to_value) = match verdict {
            RecommendationVerdict::StronglyRecommended => (
                format!(
                    "Partnering lifts fit by {:.1}% over the stronger company alone{}; pursue as a {}",
                    pct, critical_note, structure
                ),
                ExpectedRoi::VeryHigh,
                "3-6 months",
            ),
            RecommendationVerdict::Recommended => (
                format!(
                    "Partnering lifts fit by {:.1}%{}; a {} is worth pursuing",
                    pct, critical_note, structure
                ),
                ExpectedRoi::High,
                "6-9 months",
            ),
            RecommendationVerdict::Conditional => (
                format!(
                    "Partnering lifts fit by only {:.1}%{}; proceed as a {} if terms stay light",
                    pct, critical_note, structure
                ),
                ExpectedRoi::Moderate,
                "9-12 months",
            ),
            RecommendationVerdict::NotRecommended => (
                format!(
                    "A {:.1}% lift does not justify a formal partnership for this opportunity",
                    pct
                ),
                ExpectedRoi::Low,
                "Not expected within 12 months",
            ),
        };

        StrategyRecommendation {
            verdict,
            rationale,
            expected_roi,
            time_to_value: time_to_value.to_string(),
        }
    }
}
