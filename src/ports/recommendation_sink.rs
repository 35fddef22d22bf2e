//! RecommendationSink port - Best-effort persistence of analysis summaries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CompanyId, DomainError, OpportunityId};

/// Summary written back to the partnership recommendation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub company_a_id: CompanyId,
    pub company_b_id: CompanyId,
    pub opportunity_id: OpportunityId,
    pub lift_percentage: f64,
}

/// Stores analysis summaries. Failures are logged by the caller and never
/// fail the analysis.
#[async_trait]
pub trait RecommendationSink: Send + Sync {
    async fn record(&self, record: &RecommendationRecord) -> Result<(), DomainError>;
}
