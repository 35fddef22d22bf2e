//! Analysis engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::partnership::{
    RevenueModel, RevenueSharingOptions, DEFAULT_PASS_THRESHOLD, DEFAULT_SYNERGY_BONUS_FRACTION,
};

/// Tunables for the partnership lift analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Per-requirement score at or above which a requirement is met
    #[serde(default = "default_pass_threshold")]
    pub requirement_pass_threshold: f64,

    /// Share of revenue reserved as a synergy bonus (0-0.5)
    #[serde(default = "default_synergy_bonus_fraction")]
    pub synergy_bonus_fraction: f64,

    /// Revenue split model
    #[serde(default)]
    pub revenue_model: RevenueModel,

    /// Company A's share of delivery effort, used by `effort_based`
    #[serde(default = "default_effort_ratio")]
    pub effort_ratio_a: f64,

    /// Write a summary record after each analysis
    #[serde(default = "default_persist")]
    pub persist_recommendations: bool,
}

impl AnalysisConfig {
    /// Revenue sharing options for the contribution analyzer
    pub fn revenue_options(&self) -> RevenueSharingOptions {
        RevenueSharingOptions {
            model: self.revenue_model,
            effort_ratio_a: Some(self.effort_ratio_a),
            synergy_bonus_fraction: self.synergy_bonus_fraction,
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=100.0).contains(&self.requirement_pass_threshold) {
            return Err(ValidationError::InvalidPassThreshold(
                self.requirement_pass_threshold,
            ));
        }
        if !(0.0..=0.5).contains(&self.synergy_bonus_fraction) {
            return Err(ValidationError::InvalidSynergyBonus(self.synergy_bonus_fraction));
        }
        if !(0.0..=1.0).contains(&self.effort_ratio_a) {
            return Err(ValidationError::InvalidEffortRatio(self.effort_ratio_a));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            requirement_pass_threshold: default_pass_threshold(),
            synergy_bonus_fraction: default_synergy_bonus_fraction(),
            revenue_model: RevenueModel::default(),
            effort_ratio_a: default_effort_ratio(),
            persist_recommendations: default_persist(),
        }
    }
}

fn default_pass_threshold() -> f64 {
    DEFAULT_PASS_THRESHOLD
}

fn default_synergy_bonus_fraction() -> f64 {
    DEFAULT_SYNERGY_BONUS_FRACTION
}

fn default_effort_ratio() -> f64 {
    0.5
}

fn default_persist() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.requirement_pass_threshold, 70.0);
        assert_eq!(config.synergy_bonus_fraction, 0.10);
        assert_eq!(config.revenue_model, RevenueModel::ShapleyContribution);
        assert!(config.persist_recommendations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let config = AnalysisConfig {
            requirement_pass_threshold: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPassThreshold(_))
        ));

        let config = AnalysisConfig {
            synergy_bonus_fraction: 0.6,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSynergyBonus(_))
        ));

        let config = AnalysisConfig {
            effort_ratio_a: -0.2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidEffortRatio(_))
        ));
    }

    #[test]
    fn test_revenue_options_carry_settings() {
        let config = AnalysisConfig {
            revenue_model: RevenueModel::EffortBased,
            effort_ratio_a: 0.4,
            ..Default::default()
        };
        let options = config.revenue_options();
        assert_eq!(options.model, RevenueModel::EffortBased);
        assert_eq!(options.effort_ratio_a, Some(0.4));
        assert_eq!(options.synergy_bonus_fraction, 0.10);
    }

    #[test]
    fn test_analysis_deserialization() {
        let json = r#"{
            "requirement_pass_threshold": 65.0,
            "revenue_model": "equal",
            "persist_recommendations": false
        }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.requirement_pass_threshold, 65.0);
        assert_eq!(config.revenue_model, RevenueModel::Equal);
        assert!(!config.persist_recommendations);
        assert_eq!(config.effort_ratio_a, 0.5);
    }
}
