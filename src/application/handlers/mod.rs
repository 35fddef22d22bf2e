//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod partnership;

pub use partnership::{
    AnalyzePartnershipLiftCommand, AnalyzePartnershipLiftHandler, ENGINE_VERSION,
};
