//! Opportunity value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::OpportunityId;

/// A named, weighted requirement of an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Requirement {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// An opportunity a company (or partnership) may bid on.
///
/// The engine only looks at the requirement list; everything else is
/// carried through for the scoring collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(default)]
    pub id: OpportunityId,
    pub title: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl Opportunity {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: OpportunityId::new(),
            title: title.into(),
            requirements: Vec::new(),
            sector: None,
            region: None,
        }
    }

    pub fn with_id(mut self, id: OpportunityId) -> Self {
        self.id = id;
        self
    }

    pub fn with_requirement(mut self, name: impl Into<String>, weight: f64) -> Self {
        self.requirements.push(Requirement::new(name, weight));
        self
    }
}
