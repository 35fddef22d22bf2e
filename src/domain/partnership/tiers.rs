//! Threshold ladders shared by the lift, contribution and strategy services.
//!
//! Every tiered classification in the analysis is a `Ladder`: an ordered
//! list of `(exclusive lower bound, tier)` rungs checked from the top, with
//! a floor tier for everything at or below the last bound. A value exactly
//! on a bound falls to the tier below it.
//!
//! The ladders deliberately keep their own bounds. Synergy category and
//! partnership structure both look at lift percentage but cut at different
//! points (e.g. 25% is "strong" synergy yet only a prime-subcontractor
//! structure).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered threshold table mapping a number onto a tier.
#[derive(Debug, Clone, Copy)]
pub struct Ladder<T: 'static> {
    rungs: &'static [(f64, T)],
    floor: T,
}

impl<T: Copy + PartialEq> Ladder<T> {
    /// Rungs must be sorted by descending bound.
    pub const fn new(rungs: &'static [(f64, T)], floor: T) -> Self {
        Self { rungs, floor }
    }

    /// Tier for `value`. NaN lands on the floor.
    pub fn classify(&self, value: f64) -> T {
        self.rungs
            .iter()
            .find(|(bound, _)| value > *bound)
            .map(|(_, tier)| *tier)
            .unwrap_or(self.floor)
    }
}

/// How much a partnership improves on the better standalone company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynergyCategory {
    None,
    Minimal,
    Moderate,
    Strong,
    Exceptional,
}

impl SynergyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SynergyCategory::None => "none",
            SynergyCategory::Minimal => "minimal",
            SynergyCategory::Moderate => "moderate",
            SynergyCategory::Strong => "strong",
            SynergyCategory::Exceptional => "exceptional",
        }
    }
}

/// Expected integration effort. Rises with lift: bigger lift usually means
/// more capabilities have to be stitched together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinationRisk {
    Low,
    Medium,
    High,
}

impl CoordinationRisk {
    pub fn label(&self) -> &'static str {
        match self {
            CoordinationRisk::Low => "low",
            CoordinationRisk::Medium => "medium",
            CoordinationRisk::High => "high",
        }
    }
}

/// Legal/commercial form of the partnership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnershipStructure {
    ReferralOnly,
    TeamingAgreement,
    PrimeSubcontractor,
    StrategicAlliance,
    JointVenture,
}

impl PartnershipStructure {
    pub fn label(&self) -> &'static str {
        match self {
            PartnershipStructure::ReferralOnly => "Referral Partnership",
            PartnershipStructure::TeamingAgreement => "Teaming Agreement",
            PartnershipStructure::PrimeSubcontractor => "Prime-Subcontractor",
            PartnershipStructure::StrategicAlliance => "Strategic Alliance",
            PartnershipStructure::JointVenture => "Joint Venture",
        }
    }
}

impl fmt::Display for PartnershipStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Go/no-go verdict for pursuing the partnership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationVerdict {
    NotRecommended,
    Conditional,
    Recommended,
    StronglyRecommended,
}

impl RecommendationVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationVerdict::NotRecommended => "not recommended",
            RecommendationVerdict::Conditional => "conditional",
            RecommendationVerdict::Recommended => "recommended",
            RecommendationVerdict::StronglyRecommended => "strongly recommended",
        }
    }
}

impl fmt::Display for RecommendationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How lopsided the contribution split is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalanceLevel {
    None,
    Low,
    Moderate,
    High,
    Significant,
}

impl ImbalanceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ImbalanceLevel::None => "none",
            ImbalanceLevel::Low => "low",
            ImbalanceLevel::Moderate => "moderate",
            ImbalanceLevel::High => "high",
            ImbalanceLevel::Significant => "significant",
        }
    }
}

/// Lift percentage → synergy category.
pub const SYNERGY_LADDER: Ladder<SynergyCategory> = Ladder::new(
    &[
        (25.0, SynergyCategory::Exceptional),
        (15.0, SynergyCategory::Strong),
        (5.0, SynergyCategory::Moderate),
        (0.0, SynergyCategory::Minimal),
    ],
    SynergyCategory::None,
);

/// Lift percentage → coordination risk.
pub const COORDINATION_RISK_LADDER: Ladder<CoordinationRisk> = Ladder::new(
    &[(25.0, CoordinationRisk::High), (10.0, CoordinationRisk::Medium)],
    CoordinationRisk::Low,
);

/// Lift percentage → partnership structure.
pub const STRUCTURE_LADDER: Ladder<PartnershipStructure> = Ladder::new(
    &[
        (40.0, PartnershipStructure::JointVenture),
        (25.0, PartnershipStructure::StrategicAlliance),
        (15.0, PartnershipStructure::PrimeSubcontractor),
        (5.0, PartnershipStructure::TeamingAgreement),
    ],
    PartnershipStructure::ReferralOnly,
);

/// Lift percentage → recommendation verdict.
pub const VERDICT_LADDER: Ladder<RecommendationVerdict> = Ladder::new(
    &[
        (30.0, RecommendationVerdict::StronglyRecommended),
        (15.0, RecommendationVerdict::Recommended),
        (5.0, RecommendationVerdict::Conditional),
    ],
    RecommendationVerdict::NotRecommended,
);

/// Absolute contribution gap (percentage points) → imbalance level.
pub const IMBALANCE_LADDER: Ladder<ImbalanceLevel> = Ladder::new(
    &[
        (30.0, ImbalanceLevel::Significant),
        (25.0, ImbalanceLevel::High),
        (15.0, ImbalanceLevel::Moderate),
        (5.0, ImbalanceLevel::Low),
    ],
    ImbalanceLevel::None,
);
