//! In-memory adapters.
//!
//! Back the ports with plain maps so the engine can run without external
//! services: from the demo binary, from fixtures, and in tests.

mod company_repository;
mod fit_scorer;
mod recommendation_sink;
mod scenario;

pub use company_repository::InMemoryCompanyRepository;
pub use fit_scorer::StaticFitScorer;
pub use recommendation_sink::InMemoryRecommendationSink;
pub use scenario::{Scenario, ScenarioScores};
