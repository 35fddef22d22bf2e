//! In-memory recommendation sink.

use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{RecommendationRecord, RecommendationSink};

/// Sink that keeps every record in a list.
///
/// `failing()` builds a sink that rejects every write, for exercising the
/// best-effort path.
#[derive(Default)]
pub struct InMemoryRecommendationSink {
    records: RwLock<Vec<RecommendationRecord>>,
    reject_writes: bool,
}

impl InMemoryRecommendationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    /// Snapshot of the records written so far.
    pub fn records(&self) -> Vec<RecommendationRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RecommendationSink for InMemoryRecommendationSink {
    async fn record(&self, record: &RecommendationRecord) -> Result<(), DomainError> {
        if self.reject_writes {
            return Err(DomainError::new(
                ErrorCode::PersistenceFailed,
                "Recommendation store is read-only",
            ));
        }
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}
