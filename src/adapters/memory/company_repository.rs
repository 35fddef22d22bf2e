//! In-memory company and opportunity store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{CompanyId, DomainError, ErrorCode, OpportunityId};
use crate::domain::partnership::{Company, Opportunity};
use crate::ports::CompanyRepository;

/// Company repository backed by hash maps.
///
/// # Example
///
/// ```ignore
/// let repo = InMemoryCompanyRepository::new();
/// repo.insert_company(Company::new("Acme"));
/// ```
#[derive(Default)]
pub struct InMemoryCompanyRepository {
    companies: RwLock<HashMap<CompanyId, Company>>,
    opportunities: RwLock<HashMap<OpportunityId, Opportunity>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a company, replacing any profile with the same id.
    pub fn insert_company(&self, company: Company) {
        self.companies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(company.id, company);
    }

    /// Stores an opportunity, replacing any with the same id.
    pub fn insert_opportunity(&self, opportunity: Opportunity) {
        self.opportunities
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(opportunity.id, opportunity);
    }

    pub fn company_count(&self) -> usize {
        self.companies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn get_company(&self, id: &CompanyId) -> Result<Company, DomainError> {
        self.companies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CompanyNotFound, format!("Company {} not found", id))
                    .with_detail("company_id", id.to_string())
            })
    }

    async fn get_opportunity(&self, id: &OpportunityId) -> Result<Opportunity, DomainError> {
        self.opportunities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::OpportunityNotFound,
                    format!("Opportunity {} not found", id),
                )
                .with_detail("opportunity_id", id.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_stored_company() {
        let repo = InMemoryCompanyRepository::new();
        let company = Company::new("Acme");
        let id = company.id;
        repo.insert_company(company);

        let found = repo.get_company(&id).await.unwrap();

        assert_eq!(found.name, "Acme");
        assert_eq!(repo.company_count(), 1);
    }

    #[tokio::test]
    async fn missing_company_is_not_found() {
        let repo = InMemoryCompanyRepository::new();

        let err = repo.get_company(&CompanyId::new()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CompanyNotFound);
        assert!(err.details.contains_key("company_id"));
    }

    #[tokio::test]
    async fn missing_opportunity_is_not_found() {
        let repo = InMemoryCompanyRepository::new();
        repo.insert_opportunity(Opportunity::new("Bridge retrofit"));

        let err = repo.get_opportunity(&OpportunityId::new()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::OpportunityNotFound);
    }
}
