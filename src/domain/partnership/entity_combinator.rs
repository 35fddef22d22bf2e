//! Entity Combinator - Builds the hypothetical partnership entity.
//!
//! The combined entity is what gets scored to answer "how would these two
//! companies fit the opportunity together". It only lives for one analysis.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{CapabilityLevel, Company, SizeCategory};
use crate::domain::foundation::CompanyId;

/// Which parent a merged capability came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilitySource {
    CompanyA,
    CompanyB,
    Both,
}

/// A capability of the combined entity, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedCapability {
    pub name: String,
    pub level: CapabilityLevel,
    pub source: CapabilitySource,
}

/// Synthetic company-shaped value representing the partnership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedEntity {
    pub name: String,
    pub parent_ids: [CompanyId; 2],
    pub capabilities: Vec<MergedCapability>,
    pub certifications: Vec<String>,
    pub size: SizeCategory,
    pub regions: Vec<String>,
    pub industries: Vec<String>,
    pub years_in_business: u32,
}

impl CombinedEntity {
    /// Capabilities attributed to `source`.
    pub fn capabilities_from(&self, source: CapabilitySource) -> impl Iterator<Item = &MergedCapability> {
        self.capabilities.iter().filter(move |c| c.source == source)
    }

    /// Capabilities both parents bring (and which were upgraded).
    pub fn shared_capabilities(&self) -> impl Iterator<Item = &MergedCapability> {
        self.capabilities_from(CapabilitySource::Both)
    }
}

/// Combines two company profiles into a single entity.
pub struct EntityCombinator;

impl EntityCombinator {
    /// Merges two companies into a combined entity.
    ///
    /// - Capabilities are keyed by name. A name present in both parents is
    ///   upgraded one level above the stronger parent (capped at expert) and
    ///   tagged `Both`; otherwise the parent's level and tag are kept.
    /// - Certifications, regions and industries are unioned with
    ///   case-sensitive equality, first occurrence order preserved.
    /// - Size and years in business take the larger value.
    ///
    /// # Edge Cases
    /// - A name repeated within one parent keeps that parent's highest level
    ///   and is not treated as shared.
    /// - Empty parents yield an empty capability set.
    pub fn create_combined_entity(company_a: &Company, company_b: &Company) -> CombinedEntity {
        CombinedEntity {
            name: format!("{} + {}", company_a.name, company_b.name),
            parent_ids: [company_a.id, company_b.id],
            capabilities: Self::merge_capabilities(company_a, company_b),
            certifications: union(&company_a.certifications, &company_b.certifications),
            size: company_a.size.max(company_b.size),
            regions: union(&company_a.regions, &company_b.regions),
            industries: union(&company_a.industries, &company_b.industries),
            years_in_business: company_a.years_in_business.max(company_b.years_in_business),
        }
    }

    fn merge_capabilities(company_a: &Company, company_b: &Company) -> Vec<MergedCapability> {
        let mut merged: Vec<MergedCapability> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for cap in &company_a.capabilities {
            match index.get(&cap.name) {
                Some(&i) => merged[i].level = merged[i].level.max(cap.level),
                None => {
                    index.insert(cap.name.clone(), merged.len());
                    merged.push(MergedCapability {
                        name: cap.name.clone(),
                        level: cap.level,
                        source: CapabilitySource::CompanyA,
                    });
                }
            }
        }

        // Strongest level B declares per name, so repeats in B upgrade once.
        let mut b_levels: Vec<(&str, CapabilityLevel)> = Vec::new();
        for cap in &company_b.capabilities {
            match b_levels.iter_mut().find(|(name, _)| *name == cap.name) {
                Some(entry) => entry.1 = entry.1.max(cap.level),
                None => b_levels.push((cap.name.as_str(), cap.level)),
            }
        }

        for (name, level) in b_levels {
            match index.get(name) {
                Some(&i) => {
                    let entry = &mut merged[i];
                    entry.level = entry.level.max(level).upgraded();
                    entry.source = CapabilitySource::Both;
                }
                None => {
                    index.insert(name.to_string(), merged.len());
                    merged.push(MergedCapability {
                        name: name.to_string(),
                        level,
                        source: CapabilitySource::CompanyB,
                    });
                }
            }
        }

        merged
    }
}

fn union(a: &[String], b: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(a.len() + b.len());
    for value in a.iter().chain(b) {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}
