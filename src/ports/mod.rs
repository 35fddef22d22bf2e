//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompanyRepository` - Company and opportunity lookup
//! - `FitScorer` - External fit scoring collaborator
//! - `RecommendationSink` - Best-effort summary persistence

mod company_repository;
mod fit_scorer;
mod recommendation_sink;

pub use company_repository::CompanyRepository;
pub use fit_scorer::{FitScorer, ScoringSubject};
pub use recommendation_sink::{RecommendationRecord, RecommendationSink};
