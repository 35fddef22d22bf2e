//! Company profile value objects consumed by the analysis.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::CompanyId;

/// Qualitative strength of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityLevel {
    Low,
    Medium,
    High,
    Expert,
}

impl CapabilityLevel {
    /// Returns the next level up, saturating at `Expert`.
    pub fn upgraded(self) -> Self {
        match self {
            CapabilityLevel::Low => CapabilityLevel::Medium,
            CapabilityLevel::Medium => CapabilityLevel::High,
            CapabilityLevel::High | CapabilityLevel::Expert => CapabilityLevel::Expert,
        }
    }

    /// Returns the display label for this level.
    pub fn label(&self) -> &'static str {
        match self {
            CapabilityLevel::Low => "low",
            CapabilityLevel::Medium => "medium",
            CapabilityLevel::High => "high",
            CapabilityLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Company size band.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    #[default]
    Startup,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl SizeCategory {
    /// Ordinal position, used to measure how far apart two companies are.
    pub fn rank(&self) -> u8 {
        match self {
            SizeCategory::Startup => 0,
            SizeCategory::Small => 1,
            SizeCategory::Medium => 2,
            SizeCategory::Large => 3,
            SizeCategory::Enterprise => 4,
        }
    }

    /// Number of bands separating two sizes.
    pub fn distance(&self, other: &SizeCategory) -> u8 {
        self.rank().abs_diff(other.rank())
    }
}

/// A named capability with its strength.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    pub level: CapabilityLevel,
}

impl Capability {
    pub fn new(name: impl Into<String>, level: CapabilityLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// Read-only snapshot of a company profile.
///
/// Missing lists deserialize as empty so partially filled profiles can
/// still be analysed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub size: SizeCategory,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub years_in_business: u32,
}

impl Company {
    /// Creates an empty profile with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CompanyId::new(),
            name: name.into(),
            capabilities: Vec::new(),
            certifications: Vec::new(),
            size: SizeCategory::default(),
            regions: Vec::new(),
            industries: Vec::new(),
            years_in_business: 0,
        }
    }

    pub fn with_id(mut self, id: CompanyId) -> Self {
        self.id = id;
        self
    }

    pub fn with_capability(mut self, name: impl Into<String>, level: CapabilityLevel) -> Self {
        self.capabilities.push(Capability::new(name, level));
        self
    }

    pub fn with_certification(mut self, certification: impl Into<String>) -> Self {
        self.certifications.push(certification.into());
        self
    }

    pub fn with_size(mut self, size: SizeCategory) -> Self {
        self.size = size;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.regions.push(region.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industries.push(industry.into());
        self
    }

    pub fn with_years_in_business(mut self, years: u32) -> Self {
        self.years_in_business = years;
        self
    }

    /// True when the two companies share no region at all.
    ///
    /// Companies with no declared regions are not considered mismatched.
    pub fn has_geographic_mismatch(&self, other: &Company) -> bool {
        if self.regions.is_empty() || other.regions.is_empty() {
            return false;
        }
        !self.regions.iter().any(|r| other.regions.contains(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_level_upgrades_one_step() {
        assert_eq!(CapabilityLevel::Low.upgraded(), CapabilityLevel::Medium);
        assert_eq!(CapabilityLevel::Medium.upgraded(), CapabilityLevel::High);
        assert_eq!(CapabilityLevel::High.upgraded(), CapabilityLevel::Expert);
    }

    #[test]
    fn capability_level_upgrade_caps_at_expert() {
        assert_eq!(CapabilityLevel::Expert.upgraded(), CapabilityLevel::Expert);
    }

    #[test]
    fn capability_levels_are_ordered() {
        assert!(CapabilityLevel::Low < CapabilityLevel::Medium);
        assert!(CapabilityLevel::High < CapabilityLevel::Expert);
    }

    #[test]
    fn size_categories_are_ordered() {
        assert!(SizeCategory::Startup < SizeCategory::Small);
        assert!(SizeCategory::Large < SizeCategory::Enterprise);
        assert_eq!(SizeCategory::Startup.max(SizeCategory::Medium), SizeCategory::Medium);
    }

    #[test]
    fn size_distance_is_symmetric() {
        assert_eq!(SizeCategory::Startup.distance(&SizeCategory::Enterprise), 4);
        assert_eq!(SizeCategory::Enterprise.distance(&SizeCategory::Startup), 4);
        assert_eq!(SizeCategory::Medium.distance(&SizeCategory::Medium), 0);
    }

    #[test]
    fn geographic_mismatch_requires_disjoint_regions() {
        let a = Company::new("A").with_region("EMEA");
        let b = Company::new("B").with_region("APAC");
        let c = Company::new("C").with_region("EMEA").with_region("NA");

        assert!(a.has_geographic_mismatch(&b));
        assert!(!a.has_geographic_mismatch(&c));
        assert!(!a.has_geographic_mismatch(&Company::new("D")));
    }

    #[test]
    fn company_deserializes_with_missing_lists() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Acme Consulting"
        }"#;

        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.name, "Acme Consulting");
        assert!(company.capabilities.is_empty());
        assert!(company.regions.is_empty());
        assert_eq!(company.size, SizeCategory::Startup);
        assert_eq!(company.years_in_business, 0);
    }

    #[test]
    fn capability_level_serializes_snake_case() {
        let json = serde_json::to_string(&CapabilityLevel::Expert).unwrap();
        assert_eq!(json, "\"expert\"");
    }
}
