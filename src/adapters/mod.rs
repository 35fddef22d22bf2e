//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory repository, scorer and sink, plus JSON scenarios

pub mod memory;

pub use memory::{
    InMemoryCompanyRepository, InMemoryRecommendationSink, Scenario, ScenarioScores,
    StaticFitScorer,
};
