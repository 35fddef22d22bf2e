//! CompanyRepository port - Read access to company profiles and opportunities.

use async_trait::async_trait;

use crate::domain::foundation::{CompanyId, DomainError, OpportunityId};
use crate::domain::partnership::{Company, Opportunity};

/// Read-only lookup of the analysis inputs.
///
/// Implementations return `CompanyNotFound` / `OpportunityNotFound` when an
/// id does not resolve, and any other code for infrastructure failures.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Fetch a company profile snapshot.
    async fn get_company(&self, id: &CompanyId) -> Result<Company, DomainError>;

    /// Fetch an opportunity.
    async fn get_opportunity(&self, id: &OpportunityId) -> Result<Opportunity, DomainError>;
}
