use std::sync::Arc;

use serde::Serialize;

use crate::aggregation::{AggregateReport, ResultAggregator};
use crate::core::{
    AnalysisConfig, AnalysisError, AnalysisRecord, AspectKeywordTable, AspectLabel, Result, Sentence,
};
use crate::pipelines::aspect_classification::AspectClassifier;
use crate::pipelines::sentiment_analysis::SentimentScorer;
use crate::text::SentenceSegmenter;

/// Records produced by one analysis run plus what happened along the way.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalysisRun {
    records: Vec<AnalysisRecord>,
    sentences: usize,
    skipped_fragments: usize,
    unclassified: usize,
    degraded_sentences: usize,
}

impl AnalysisRun {
    /// Records in original sentence order.
    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AnalysisRecord> {
        self.records
    }

    /// `true` when no aspect was found. This is a valid result, not a failure.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sentences produced by segmentation.
    pub fn sentences(&self) -> usize {
        self.sentences
    }

    pub fn skipped_fragments(&self) -> usize {
        self.skipped_fragments
    }

    pub fn unclassified(&self) -> usize {
        self.unclassified
    }

    /// Sentences whose scoring failed and were recorded with neutral polarity.
    pub fn degraded_sentences(&self) -> usize {
        self.degraded_sentences
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded_sentences > 0
    }
}

/// Segment → classify → score. Built with
/// [`AnalysisPipelineBuilder`](super::AnalysisPipelineBuilder).
///
/// Holds only shared, read-only capabilities, so one pipeline can serve
/// concurrent runs.
pub struct AnalysisPipeline {
    pub(crate) table: Arc<AspectKeywordTable>,
    pub(crate) config: AnalysisConfig,
    pub(crate) segmenter: Arc<dyn SentenceSegmenter>,
    pub(crate) classifier: AspectClassifier,
    pub(crate) scorer: SentimentScorer,
}

impl std::fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("aspects", &self.table.aspects().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AnalysisPipeline {
    pub fn table(&self) -> &AspectKeywordTable {
        &self.table
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn classifier(&self) -> &AspectClassifier {
        &self.classifier
    }

    /// Aggregator sharing this pipeline's vocabulary and negative threshold.
    pub fn aggregator(&self) -> Result<ResultAggregator> {
        ResultAggregator::with_threshold(Arc::clone(&self.table), self.config.negative_threshold)
    }

    /// Analyse one entity's raw text.
    ///
    /// Empty text, or text without any aspect keyword, yields an empty run.
    pub fn analyze(&self, text: &str) -> Result<AnalysisRun> {
        if let Some(max) = self.config.max_input_chars {
            let len = text.chars().count();
            if len > max {
                return Err(AnalysisError::InputTooLong { len, max });
            }
        }

        let span = tracing::info_span!("aspect_analysis", input_chars = text.len());
        let _enter = span.enter();

        let sentences = self.segmenter.segment(text);
        let mut run = AnalysisRun {
            sentences: sentences.len(),
            ..AnalysisRun::default()
        };

        let mut classified: Vec<(Sentence, AspectLabel)> = Vec::new();
        for sentence in sentences {
            if sentence.as_str().trim().chars().count() < self.config.min_sentence_chars {
                run.skipped_fragments += 1;
                continue;
            }
            let label = self.classifier.classify(sentence.as_str());
            tracing::debug!(sentence = %sentence, aspect = %label, "classified sentence");
            if label.is_unclassified() {
                run.unclassified += 1;
                continue;
            }
            classified.push((sentence, label));
        }

        for chunk in classified.chunks(self.config.batch_size.max(1)) {
            let texts: Vec<&str> = chunk.iter().map(|(s, _)| s.as_str()).collect();
            let outcomes = self.scorer.score_batch(&texts);

            for ((sentence, label), outcome) in chunk.iter().zip(outcomes) {
                if outcome.is_degraded() {
                    run.degraded_sentences += 1;
                }
                if let Some(record) = AnalysisRecord::new(sentence.clone(), label, outcome.polarity) {
                    run.records.push(record);
                }
            }
        }

        tracing::info!(
            sentences = run.sentences,
            records = run.records.len(),
            unclassified = run.unclassified,
            degraded = run.degraded_sentences,
            "analysis run finished"
        );
        Ok(run)
    }

    /// Analyse and aggregate in one step.
    pub fn analyze_and_aggregate(&self, text: &str) -> Result<(AnalysisRun, AggregateReport)> {
        let run = self.analyze(text)?;
        let report = self.aggregator()?.aggregate(run.records());
        Ok((run, report))
    }
}
