use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::pipeline::{AnalysisPipeline, AnalysisRun};
use crate::aggregation::{compare, AggregateReport, ComparisonSeries};
use crate::core::{AnalysisError, Result};

/// Raw review text for one named entity (e.g. a product).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityText {
    pub name: String,
    pub text: String,
}

impl EntityText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// One entity's run and the report derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityReport {
    pub name: String,
    pub run: AnalysisRun,
    pub report: AggregateReport,
}

/// Both entities plus their paired per-aspect series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityComparison {
    pub a: EntityReport,
    pub b: EntityReport,
    pub series: ComparisonSeries,
}

impl AnalysisPipeline {
    /// Analyse and aggregate one named entity.
    pub fn report(&self, entity: EntityText) -> Result<EntityReport> {
        let (run, report) = self.analyze_and_aggregate(&entity.text)?;
        Ok(EntityReport {
            name: entity.name,
            run,
            report,
        })
    }

    /// Analyse two entities concurrently and pair their reports.
    ///
    /// Each entity runs on its own blocking task. With a `deadline`, the pair
    /// either completes in time or fails with [`AnalysisError::Timeout`]; no
    /// partial result is returned in either failure case.
    pub async fn analyze_pair(
        self: Arc<Self>,
        a: EntityText,
        b: EntityText,
        deadline: Option<Duration>,
    ) -> Result<EntityComparison> {
        let both = run_both(self, a, b);
        let (a, b) = match deadline {
            Some(limit) => tokio::time::timeout(limit, both)
                .await
                .map_err(|_| AnalysisError::Timeout(limit))??,
            None => both.await?,
        };

        let series = compare(&a.report, &b.report)?;
        Ok(EntityComparison { a, b, series })
    }
}

async fn run_both(
    pipeline: Arc<AnalysisPipeline>,
    a: EntityText,
    b: EntityText,
) -> Result<(EntityReport, EntityReport)> {
    let pipeline_a = Arc::clone(&pipeline);
    let task_a = tokio::task::spawn_blocking(move || pipeline_a.report(a));
    let task_b = tokio::task::spawn_blocking(move || pipeline.report(b));

    let (a, b) = tokio::join!(task_a, task_b);
    let a = a.map_err(|e| AnalysisError::TaskFailed(e.to_string()))??;
    let b = b.map_err(|e| AnalysisError::TaskFailed(e.to_string()))??;
    Ok((a, b))
}
