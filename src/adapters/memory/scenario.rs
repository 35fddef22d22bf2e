//! JSON scenario files for running an analysis without live services.
//!
//! A scenario names two companies, an opportunity and the three fit
//! scores the scoring service would return:
//!
//! ```json
//! {
//!   "company_a": { "name": "Acme", "capabilities": [{ "name": "cloud", "level": "high" }] },
//!   "company_b": { "name": "Globex" },
//!   "opportunity": { "title": "Agency modernization", "requirements": [{ "name": "cloud" }] },
//!   "scores": {
//!     "company_a": { "total_score": 60.0 },
//!     "company_b": { "total_score": 55.0 },
//!     "combined": { "total_score": 72.0 }
//!   }
//! }
//! ```
//!
//! The same shape is accepted as YAML. Ids may be omitted; fresh ones are
//! generated.

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use super::{InMemoryCompanyRepository, StaticFitScorer};
use crate::application::AnalyzePartnershipLiftCommand;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::partnership::{Company, FitScore, Opportunity};

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioScores {
    pub company_a: FitScore,
    pub company_b: FitScore,
    pub combined: FitScore,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub company_a: Company,
    pub company_b: Company,
    pub opportunity: Opportunity,
    pub scores: ScenarioScores,
}

impl Scenario {
    /// Parses a scenario document.
    ///
    /// # Errors
    /// `InvalidInput` when the document does not match the scenario shape.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let scenario: Self = serde_json::from_str(json).map_err(|e| {
            DomainError::new(ErrorCode::InvalidInput, format!("Invalid scenario: {}", e))
        })?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Parses a YAML scenario document.
    ///
    /// # Errors
    /// `InvalidInput` when the document does not match the scenario shape.
    pub fn from_yaml(yaml: &str) -> Result<Self, DomainError> {
        let scenario: Self = serde_yaml::from_str(yaml).map_err(|e| {
            DomainError::new(ErrorCode::InvalidInput, format!("Invalid scenario: {}", e))
        })?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Names and the title are shown in every summary, so blank ones are
    /// rejected.
    fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("company_a.name", &self.company_a.name),
            ("company_b.name", &self.company_b.name),
            ("opportunity.title", &self.opportunity.title),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ValidationError::empty_field(*field)),
            None => Ok(()),
        }
    }

    /// Reads a scenario file. `.yaml` and `.yml` files are parsed as YAML,
    /// anything else as JSON.
    ///
    /// # Errors
    /// `InternalError` when the file cannot be read, `InvalidInput` when it
    /// cannot be parsed.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to read scenario: {}", e),
            )
            .with_detail("path", path.display().to_string())
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let scenario = if is_yaml {
            Self::from_yaml(&contents)
        } else {
            Self::from_json(&contents)
        };
        scenario.map_err(|e| e.with_detail("path", path.display().to_string()))
    }

    /// Command analyzing this scenario's pair against its opportunity.
    pub fn command(&self) -> AnalyzePartnershipLiftCommand {
        AnalyzePartnershipLiftCommand {
            company_a_id: self.company_a.id,
            company_b_id: self.company_b.id,
            opportunity_id: self.opportunity.id,
        }
    }

    /// Repository and scorer preloaded with this scenario.
    pub fn into_adapters(self) -> (Arc<InMemoryCompanyRepository>, Arc<StaticFitScorer>) {
        let scorer = StaticFitScorer::new()
            .with_company_score(self.company_a.id, self.scores.company_a)
            .with_company_score(self.company_b.id, self.scores.company_b)
            .with_combined_score(self.company_a.id, self.company_b.id, self.scores.combined);

        let repository = InMemoryCompanyRepository::new();
        repository.insert_company(self.company_a);
        repository.insert_company(self.company_b);
        repository.insert_opportunity(self.opportunity);

        (Arc::new(repository), Arc::new(scorer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CompanyRepository;
    use tempfile::TempDir;

    const SCENARIO: &str = r#"{
        "company_a": { "name": "Acme", "capabilities": [{ "name": "cloud", "level": "high" }] },
        "company_b": { "name": "Globex", "size": "large" },
        "opportunity": { "title": "Agency modernization", "requirements": [{ "name": "cloud" }] },
        "scores": {
            "company_a": { "total_score": 60.0 },
            "company_b": { "total_score": 55.0 },
            "combined": { "total_score": 72.0, "requirement_scores": { "cloud": 85.0 } }
        }
    }"#;

    #[tokio::test]
    async fn parses_and_loads_scenario() {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        let cmd = scenario.command();
        assert_eq!(scenario.opportunity.requirements[0].weight, 1.0);

        let (repo, _scorer) = scenario.into_adapters();

        let company = repo.get_company(&cmd.company_a_id).await.unwrap();
        assert_eq!(company.name, "Acme");
        assert!(repo.get_opportunity(&cmd.opportunity_id).await.is_ok());
    }

    #[tokio::test]
    async fn loads_yaml_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pair.yaml");
        std::fs::write(
            &path,
            r#"
company_a:
  name: Acme
company_b:
  name: Globex
  regions: [EMEA]
opportunity:
  title: Port logistics
  requirements:
    - name: customs
      weight: 2.0
scores:
  company_a: { total_score: 40.0 }
  company_b: { total_score: 50.0 }
  combined: { total_score: 65.0 }
"#,
        )
        .unwrap();

        let scenario = Scenario::load(&path).await.unwrap();

        assert_eq!(scenario.company_b.regions, vec!["EMEA".to_string()]);
        assert_eq!(scenario.opportunity.requirements[0].weight, 2.0);
        assert_eq!(scenario.scores.combined.total_score, Some(65.0));
    }

    #[tokio::test]
    async fn loads_json_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pair.json");
        std::fs::write(&path, SCENARIO).unwrap();

        let scenario = Scenario::load(&path).await.unwrap();

        assert_eq!(scenario.company_a.name, "Acme");
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let err = Scenario::load(&path).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InternalError);
        assert!(err.details.contains_key("path"));
    }

    #[test]
    fn rejects_blank_company_name() {
        let json = SCENARIO.replace(r#""name": "Globex""#, r#""name": "  ""#);

        let err = Scenario::from_json(&json).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(
            err.details.get("field").map(String::as_str),
            Some("company_b.name")
        );
    }

    #[test]
    fn rejects_malformed_scenario() {
        let err = Scenario::from_json(r#"{ "company_a": {} }"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
