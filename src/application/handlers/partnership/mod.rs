//! Partnership handlers - Orchestration of the lift analysis pipeline.

mod analyze_partnership_lift;

pub use analyze_partnership_lift::{
    AnalyzePartnershipLiftCommand, AnalyzePartnershipLiftHandler, ENGINE_VERSION,
};
