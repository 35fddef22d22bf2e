//! AnalyzePartnershipLiftHandler - Runs one partnership lift analysis.
//!
//! Fetches both companies and the opportunity, scores each company on its
//! own, merges them into a combined entity and scores that, then feeds the
//! three scores through the pure domain services:
//! - `LiftCalculator` → lift, synergy tier, requirement improvements
//! - `ContributionAnalyzer` → Shapley split, fairness, revenue, stability
//! - `StrategyGenerator` → structure, governance, phases, verdict
//!
//! The two standalone scorings have no ordering constraint and run
//! concurrently. The combined scoring starts only after both have returned.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::domain::foundation::{
    AnalysisId, CompanyId, DomainError, ErrorCode, OpportunityId, Timestamp,
};
use crate::domain::partnership::{
    AnalysisMetadata, AnalysisScores, ContributionAnalyzer, ContributionInputs, EntityCombinator,
    FitScore, LiftCalculator, Opportunity, PartnershipLiftAnalysis, PartnershipRecommendation,
    StrategyGenerator,
};
use crate::ports::{
    CompanyRepository, FitScorer, RecommendationRecord, RecommendationSink, ScoringSubject,
};

/// Version stamped into every analysis.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command to analyze a pair of companies against an opportunity.
#[derive(Debug, Clone)]
pub struct AnalyzePartnershipLiftCommand {
    pub company_a_id: CompanyId,
    pub company_b_id: CompanyId,
    pub opportunity_id: OpportunityId,
}

/// Handler for partnership lift analysis.
pub struct AnalyzePartnershipLiftHandler {
    repository: Arc<dyn CompanyRepository>,
    scorer: Arc<dyn FitScorer>,
    sink: Arc<dyn RecommendationSink>,
    settings: AnalysisConfig,
}

impl AnalyzePartnershipLiftHandler {
    pub fn new(
        repository: Arc<dyn CompanyRepository>,
        scorer: Arc<dyn FitScorer>,
        sink: Arc<dyn RecommendationSink>,
        settings: AnalysisConfig,
    ) -> Self {
        Self {
            repository,
            scorer,
            sink,
            settings,
        }
    }

    /// Runs the full analysis.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when both ids name the same company, or a score
    ///   record has no usable total
    /// - `CompanyNotFound` / `OpportunityNotFound` from the repository
    /// - `UpstreamScoringFailure` when any of the three scorings fails
    ///
    /// A failure to record the summary is logged and does not fail the run.
    pub async fn handle(
        &self,
        cmd: AnalyzePartnershipLiftCommand,
    ) -> Result<PartnershipLiftAnalysis, DomainError> {
        let analyzed_at = Timestamp::now();

        if cmd.company_a_id == cmd.company_b_id {
            return Err(DomainError::invalid_input(
                "company_b_id",
                "A company cannot partner with itself",
            ));
        }

        // 1. Load inputs
        let (company_a, company_b, opportunity) = tokio::try_join!(
            self.repository.get_company(&cmd.company_a_id),
            self.repository.get_company(&cmd.company_b_id),
            self.repository.get_opportunity(&cmd.opportunity_id),
        )?;

        info!(
            company_a = %company_a.name,
            company_b = %company_b.name,
            opportunity = %opportunity.title,
            "Starting partnership lift analysis"
        );

        // 2. Score each company on its own
        let (score_a, score_b) = tokio::try_join!(
            self.score(ScoringSubject::Company(&company_a), &opportunity),
            self.score(ScoringSubject::Company(&company_b), &opportunity),
        )?;

        // 3. Combine and score the combined entity
        let combined_entity = EntityCombinator::create_combined_entity(&company_a, &company_b);
        debug!(
            entity = %combined_entity.name,
            capabilities = combined_entity.capabilities.len(),
            shared = combined_entity.shared_capabilities().count(),
            "Combined entity created"
        );
        let combined_score = self
            .score(ScoringSubject::Combined(&combined_entity), &opportunity)
            .await?;

        // 4. Pure analysis
        let lift = LiftCalculator::analyze(
            &score_a,
            &score_b,
            &combined_score,
            &opportunity,
            self.settings.requirement_pass_threshold,
        )?;
        debug!(
            baseline = lift.baseline,
            combined = lift.combined_score,
            lift_percentage = lift.lift_percentage,
            synergy = ?lift.synergy_category,
            critical_improvements = lift.critical_improvement_count(),
            "Lift calculated"
        );

        let contributions = ContributionAnalyzer::analyze(
            &ContributionInputs {
                company_a: &company_a,
                company_b: &company_b,
                combined_entity: &combined_entity,
                opportunity: &opportunity,
                score_a: &score_a,
                score_b: &score_b,
                combined_score: &combined_score,
            },
            &self.settings.revenue_options(),
        )?;
        debug!(
            contribution_a = contributions.shapley.contribution_a,
            contribution_b = contributions.shapley.contribution_b,
            fairness = contributions.fairness.fairness_score,
            stability_index = contributions.stability.stability_index,
            "Contributions analyzed"
        );

        let strategy = StrategyGenerator::generate_partnership_strategy(
            &company_a,
            &company_b,
            &lift,
            &lift.requirement_improvements,
            &contributions.shapley,
            &contributions.revenue_sharing,
        );

        let metadata = AnalysisMetadata {
            analysis_id: AnalysisId::new(),
            company_a_id: company_a.id,
            company_b_id: company_b.id,
            opportunity_id: opportunity.id,
            company_a_name: company_a.name.clone(),
            company_b_name: company_b.name.clone(),
            opportunity_title: opportunity.title.clone(),
            analyzed_at,
            duration_ms: Timestamp::now().millis_since(&analyzed_at),
            engine_version: ENGINE_VERSION.to_string(),
        };
        let recommendation =
            PartnershipRecommendation::from_results(&metadata, &lift, &contributions, &strategy);

        // 5. Best-effort persistence
        if self.settings.persist_recommendations {
            self.record_summary(&metadata, lift.lift_percentage).await;
        }

        info!(
            analysis_id = %metadata.analysis_id,
            structure = %strategy.structure,
            verdict = %recommendation.verdict,
            lift_percentage = lift.lift_percentage,
            duration_ms = metadata.duration_ms,
            "Partnership lift analysis complete"
        );

        Ok(PartnershipLiftAnalysis {
            metadata,
            scores: AnalysisScores {
                company_a: score_a,
                company_b: score_b,
                combined: combined_score,
            },
            combined_entity,
            lift,
            contributions,
            strategy,
            recommendation,
        })
    }

    async fn score(
        &self,
        subject: ScoringSubject<'_>,
        opportunity: &Opportunity,
    ) -> Result<FitScore, DomainError> {
        let name = subject.name().to_string();
        match self.scorer.score(subject, opportunity).await {
            Ok(score) => {
                debug!(subject = %name, total = ?score.total_score, "Fit score received");
                Ok(score)
            }
            Err(err) if err.code == ErrorCode::UpstreamScoringFailure => Err(err),
            Err(err) => Err(DomainError::scoring_failure(&name, err.message)
                .with_detail("cause", err.code.to_string())),
        }
    }

    async fn record_summary(&self, metadata: &AnalysisMetadata, lift_percentage: f64) {
        let record = RecommendationRecord {
            company_a_id: metadata.company_a_id,
            company_b_id: metadata.company_b_id,
            opportunity_id: metadata.opportunity_id,
            lift_percentage,
        };
        if let Err(err) = self.sink.record(&record).await {
            warn!(
                analysis_id = %metadata.analysis_id,
                error = %err,
                "Failed to record partnership recommendation"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::partnership::{
        CapabilityLevel, Company, PartnershipStructure, RecommendationVerdict, RevenueModel,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockRepository {
        companies: HashMap<CompanyId, Company>,
        opportunity: Opportunity,
    }

    impl MockRepository {
        fn new(companies: Vec<Company>, opportunity: Opportunity) -> Self {
            Self {
                companies: companies.into_iter().map(|c| (c.id, c)).collect(),
                opportunity,
            }
        }
    }

    #[async_trait]
    impl CompanyRepository for MockRepository {
        async fn get_company(&self, id: &CompanyId) -> Result<Company, DomainError> {
            self.companies
                .get(id)
                .cloned()
                .ok_or_else(|| DomainError::new(ErrorCode::CompanyNotFound, "Company not found"))
        }

        async fn get_opportunity(&self, id: &OpportunityId) -> Result<Opportunity, DomainError> {
            if *id == self.opportunity.id {
                Ok(self.opportunity.clone())
            } else {
                Err(DomainError::new(
                    ErrorCode::OpportunityNotFound,
                    "Opportunity not found",
                ))
            }
        }
    }

    /// Scores by subject name. The combined entity is "Acme + Globex".
    struct MockScorer {
        scores: HashMap<String, FitScore>,
        fail_with: Option<ErrorCode>,
        calls: Mutex<Vec<String>>,
    }

    impl MockScorer {
        fn new(a: f64, b: f64, combined: f64) -> Self {
            let scores = [("Acme", a), ("Globex", b), ("Acme + Globex", combined)]
                .into_iter()
                .map(|(name, total)| (name.to_string(), FitScore::new(total)))
                .collect();
            Self {
                scores,
                fail_with: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(code: ErrorCode) -> Self {
            Self {
                fail_with: Some(code),
                ..Self::new(0.0, 0.0, 0.0)
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FitScorer for MockScorer {
        async fn score(
            &self,
            subject: ScoringSubject<'_>,
            _opportunity: &Opportunity,
        ) -> Result<FitScore, DomainError> {
            self.calls.lock().unwrap().push(subject.name().to_string());
            if let Some(code) = self.fail_with {
                return Err(DomainError::new(code, "Scoring service unavailable"));
            }
            Ok(self
                .scores
                .get(subject.name())
                .cloned()
                .unwrap_or_default())
        }
    }

    struct MockSink {
        records: Mutex<Vec<RecommendationRecord>>,
        fail: bool,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn records(&self) -> Vec<RecommendationRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecommendationSink for MockSink {
        async fn record(&self, record: &RecommendationRecord) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::new(
                    ErrorCode::PersistenceFailed,
                    "Simulated write failure",
                ));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct Fixture {
        company_a: Company,
        company_b: Company,
        opportunity: Opportunity,
    }

    fn fixture() -> Fixture {
        Fixture {
            company_a: Company::new("Acme").with_capability("cloud", CapabilityLevel::High),
            company_b: Company::new("Globex").with_capability("security", CapabilityLevel::Expert),
            opportunity: Opportunity::new("Agency modernization")
                .with_requirement("cloud", 1.0)
                .with_requirement("security", 1.0),
        }
    }

    fn handler(
        f: &Fixture,
        scorer: Arc<MockScorer>,
        sink: Arc<MockSink>,
        settings: AnalysisConfig,
    ) -> AnalyzePartnershipLiftHandler {
        let repo = Arc::new(MockRepository::new(
            vec![f.company_a.clone(), f.company_b.clone()],
            f.opportunity.clone(),
        ));
        AnalyzePartnershipLiftHandler::new(repo, scorer, sink, settings)
    }

    fn command(f: &Fixture) -> AnalyzePartnershipLiftCommand {
        AnalyzePartnershipLiftCommand {
            company_a_id: f.company_a.id,
            company_b_id: f.company_b.id,
            opportunity_id: f.opportunity.id,
        }
    }

    #[tokio::test]
    async fn test_handle_produces_full_analysis() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::new(60.0, 55.0, 72.0));
        let sink = Arc::new(MockSink::new());
        let handler = handler(&f, scorer.clone(), sink.clone(), AnalysisConfig::default());

        let analysis = handler.handle(command(&f)).await.unwrap();

        assert_eq!(analysis.lift.baseline, 60.0);
        assert!((analysis.lift.lift_percentage - 20.0).abs() < 1e-9);
        assert_eq!(
            analysis.strategy.structure,
            PartnershipStructure::PrimeSubcontractor
        );
        assert_eq!(
            analysis.recommendation.verdict,
            RecommendationVerdict::Recommended
        );
        assert_eq!(analysis.combined_entity.name, "Acme + Globex");
        assert_eq!(analysis.metadata.engine_version, ENGINE_VERSION);
        assert_eq!(analysis.metadata.company_a_id, f.company_a.id);

        let sum = analysis.contributions.shapley.contribution_a
            + analysis.contributions.shapley.contribution_b;
        assert!((sum - 72.0).abs() < 1e-9);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert!((records[0].lift_percentage - 20.0).abs() < 1e-9);
    }

    fn assert_revenue_agrees(analysis: &PartnershipLiftAnalysis) {
        let computed = &analysis.contributions.revenue_sharing;
        let proposed = &analysis.strategy.revenue_sharing;
        assert_eq!(proposed.model, computed.model);
        assert_eq!(proposed.share_a, computed.final_share_a);
        assert_eq!(proposed.share_b, computed.final_share_b);
        assert_eq!(proposed.synergy_bonus_pool, computed.synergy_bonus_pool);
    }

    #[tokio::test]
    async fn test_strategy_revenue_follows_configured_model() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::new(90.0, 20.0, 130.0));
        let settings = AnalysisConfig {
            revenue_model: RevenueModel::Equal,
            ..Default::default()
        };
        let handler = handler(&f, scorer, Arc::new(MockSink::new()), settings);

        let analysis = handler.handle(command(&f)).await.unwrap();

        assert_revenue_agrees(&analysis);
        assert!((analysis.strategy.revenue_sharing.share_a - 50.0).abs() < 1e-9);
        assert!((analysis.strategy.revenue_sharing.share_b - 50.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_strategy_revenue_is_clamped_with_negative_contribution() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::new(10.0, 90.0, 20.0));
        let handler = handler(&f, scorer, Arc::new(MockSink::new()), AnalysisConfig::default());

        let analysis = handler.handle(command(&f)).await.unwrap();

        assert!(analysis.contributions.shapley.contribution_a < 0.0);
        assert_revenue_agrees(&analysis);
        assert_eq!(analysis.strategy.revenue_sharing.share_a, 0.0);
        assert_eq!(analysis.strategy.revenue_sharing.share_b, 100.0);
    }

    #[tokio::test]
    async fn test_combined_scoring_happens_last() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::new(60.0, 55.0, 72.0));
        let handler = handler(&f, scorer.clone(), Arc::new(MockSink::new()), AnalysisConfig::default());

        handler.handle(command(&f)).await.unwrap();

        let calls = scorer.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2], "Acme + Globex");
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_fail_analysis() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::new(60.0, 55.0, 72.0));
        let handler = handler(&f, scorer, Arc::new(MockSink::failing()), AnalysisConfig::default());

        let result = handler.handle(command(&f)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_persistence_can_be_disabled() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::new(60.0, 55.0, 72.0));
        let sink = Arc::new(MockSink::new());
        let settings = AnalysisConfig {
            persist_recommendations: false,
            ..Default::default()
        };
        let handler = handler(&f, scorer, sink.clone(), settings);

        handler.handle(command(&f)).await.unwrap();

        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn test_missing_company_propagates_not_found() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::new(60.0, 55.0, 72.0));
        let handler = handler(&f, scorer.clone(), Arc::new(MockSink::new()), AnalysisConfig::default());
        let cmd = AnalyzePartnershipLiftCommand {
            company_b_id: CompanyId::new(),
            ..command(&f)
        };

        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CompanyNotFound);
        assert!(scorer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_opportunity_propagates_not_found() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::new(60.0, 55.0, 72.0));
        let handler = handler(&f, scorer, Arc::new(MockSink::new()), AnalysisConfig::default());
        let cmd = AnalyzePartnershipLiftCommand {
            opportunity_id: OpportunityId::new(),
            ..command(&f)
        };

        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::OpportunityNotFound);
    }

    #[tokio::test]
    async fn test_same_company_twice_is_rejected() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::new(60.0, 55.0, 72.0));
        let handler = handler(&f, scorer, Arc::new(MockSink::new()), AnalysisConfig::default());
        let cmd = AnalyzePartnershipLiftCommand {
            company_b_id: f.company_a.id,
            ..command(&f)
        };

        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_scorer_errors_become_upstream_failures() {
        let f = fixture();
        let scorer = Arc::new(MockScorer::failing(ErrorCode::InternalError));
        let sink = Arc::new(MockSink::new());
        let handler = handler(&f, scorer, sink.clone(), AnalysisConfig::default());

        let err = handler.handle(command(&f)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::UpstreamScoringFailure);
        assert_eq!(err.details.get("cause").map(String::as_str), Some("INTERNAL_ERROR"));
        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn test_missing_total_is_invalid_input() {
        let f = fixture();
        let mut scorer = MockScorer::new(60.0, 55.0, 72.0);
        scorer.scores.insert("Globex".to_string(), FitScore::default());
        let handler = handler(&f, Arc::new(scorer), Arc::new(MockSink::new()), AnalysisConfig::default());

        let err = handler.handle(command(&f)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
