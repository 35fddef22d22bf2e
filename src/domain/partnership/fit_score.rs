//! Fit score records produced by the external scoring collaborator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::{DomainError, ValidationError};

/// Named scoring dimension in a fit breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDimension {
    Technical,
    Domain,
    Value,
    Innovation,
    Relationship,
}

impl ScoreDimension {
    pub const ALL: [ScoreDimension; 5] = [
        ScoreDimension::Technical,
        ScoreDimension::Domain,
        ScoreDimension::Value,
        ScoreDimension::Innovation,
        ScoreDimension::Relationship,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScoreDimension::Technical => "technical",
            ScoreDimension::Domain => "domain",
            ScoreDimension::Value => "value",
            ScoreDimension::Innovation => "innovation",
            ScoreDimension::Relationship => "relationship",
        }
    }
}

impl fmt::Display for ScoreDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fit of one entity (company or combined entity) against one opportunity.
///
/// `total_score` is the only value the lift and contribution math trusts.
/// The breakdown maps may be partial; nothing reconciles them against the
/// total. A record whose total is missing is rejected as invalid input by
/// every calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitScore {
    #[serde(default)]
    pub total_score: Option<f64>,
    #[serde(default)]
    pub requirement_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub dimension_scores: BTreeMap<ScoreDimension, f64>,
}

impl FitScore {
    /// Creates a score with only a total.
    pub fn new(total_score: f64) -> Self {
        Self {
            total_score: Some(total_score),
            ..Self::default()
        }
    }

    pub fn with_requirement(mut self, name: impl Into<String>, score: f64) -> Self {
        self.requirement_scores.insert(name.into(), score);
        self
    }

    pub fn with_dimension(mut self, dimension: ScoreDimension, score: f64) -> Self {
        self.dimension_scores.insert(dimension, score);
        self
    }

    /// Returns the validated total, naming `field` in the error.
    pub fn total(&self, field: &str) -> Result<f64, DomainError> {
        match self.total_score {
            None => Err(DomainError::invalid_input(
                field,
                format!("Score record '{}' has no numeric total", field),
            )),
            Some(total) if !total.is_finite() => Err(ValidationError::not_finite(field).into()),
            Some(total) => Ok(total),
        }
    }

    pub fn requirement_score(&self, name: &str) -> Option<f64> {
        self.requirement_scores.get(name).copied()
    }

    pub fn dimension_score(&self, dimension: ScoreDimension) -> Option<f64> {
        self.dimension_scores.get(&dimension).copied()
    }
}

/// Validated totals for the three records of one analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTotals {
    pub a: f64,
    pub b: f64,
    pub combined: f64,
}

impl ScoreTotals {
    /// Extracts all three totals, failing on the first one that is missing.
    ///
    /// An absent record (`None`) fails the same way as a record without a
    /// total.
    pub fn from_scores(
        score_a: Option<&FitScore>,
        score_b: Option<&FitScore>,
        combined: Option<&FitScore>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            a: require(score_a, "score_a")?.total("score_a")?,
            b: require(score_b, "score_b")?.total("score_b")?,
            combined: require(combined, "combined_score")?.total("combined_score")?,
        })
    }

    /// The better of the two standalone totals.
    pub fn baseline(&self) -> f64 {
        self.a.max(self.b)
    }
}

fn require<'a>(score: Option<&'a FitScore>, field: &str) -> Result<&'a FitScore, DomainError> {
    score.ok_or_else(|| {
        DomainError::invalid_input(field, format!("Score record '{}' is missing", field))
    })
}
