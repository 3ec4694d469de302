use std::sync::Arc;

use super::comparison::{compare, ComparisonSeries};
use super::report::{AggregateReport, AspectValue, NegativeSample, PerAspect, SentimentTally};
use crate::core::{AnalysisConfig, AnalysisError, AnalysisRecord, AspectKeywordTable, Result};

/// Derives [`AggregateReport`]s from analysis records.
///
/// Every output covers the whole vocabulary in vocabulary order, so reports of
/// different entities always line up. Aggregation is a pure function of the
/// records: nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ResultAggregator {
    table: Arc<AspectKeywordTable>,
    negative_threshold: f32,
}

impl ResultAggregator {
    pub fn new(table: Arc<AspectKeywordTable>) -> Self {
        Self {
            table,
            negative_threshold: AnalysisConfig::default().negative_threshold,
        }
    }

    pub fn with_threshold(table: Arc<AspectKeywordTable>, negative_threshold: f32) -> Result<Self> {
        if !(-1.0..=1.0).contains(&negative_threshold) {
            return Err(AnalysisError::Configuration(format!(
                "negative_threshold {negative_threshold} is outside [-1, 1]"
            )));
        }
        Ok(Self {
            table,
            negative_threshold,
        })
    }

    pub fn negative_threshold(&self) -> f32 {
        self.negative_threshold
    }

    fn per_aspect<T>(&self, mut value_for: impl FnMut(&str) -> T) -> PerAspect<T> {
        PerAspect::new(
            self.table
                .aspects()
                .map(|aspect| AspectValue {
                    aspect: aspect.to_string(),
                    value: value_for(aspect),
                })
                .collect(),
        )
    }

    /// Arithmetic mean of polarity per aspect, `0.0` where nothing matched.
    pub fn mean_polarity(&self, records: &[AnalysisRecord]) -> PerAspect<f64> {
        let mut sums = vec![(0.0f64, 0usize); self.table.len()];
        for record in records {
            match self.table.position(record.aspect()) {
                Some(idx) => {
                    sums[idx].0 += f64::from(record.polarity().value());
                    sums[idx].1 += 1;
                }
                None => tracing::debug!(
                    aspect = record.aspect(),
                    "record aspect is not in the vocabulary, ignoring"
                ),
            }
        }

        let mut means = sums
            .into_iter()
            .map(|(sum, count)| if count == 0 { 0.0 } else { sum / count as f64 });
        self.per_aspect(|_| means.next().unwrap_or(0.0))
    }

    /// Sentences of `aspect` with polarity strictly below the threshold.
    /// `None` when no sentence qualifies.
    pub fn negative_sample(&self, records: &[AnalysisRecord], aspect: &str) -> Option<NegativeSample> {
        let sample = self.collect_negative(records, aspect);
        (!sample.is_empty()).then_some(sample)
    }

    fn collect_negative(&self, records: &[AnalysisRecord], aspect: &str) -> NegativeSample {
        let sentences: Vec<&str> = records
            .iter()
            .filter(|r| r.aspect() == aspect && r.polarity().value() < self.negative_threshold)
            .map(|r| r.sentence().as_str())
            .collect();

        NegativeSample {
            aspect: aspect.to_string(),
            text: sentences.join(" "),
            sentence_count: sentences.len(),
        }
    }

    pub fn negative_samples(&self, records: &[AnalysisRecord]) -> PerAspect<NegativeSample> {
        self.per_aspect(|aspect| self.collect_negative(records, aspect))
    }

    fn in_vocabulary<'r>(
        &'r self,
        records: &'r [AnalysisRecord],
    ) -> impl Iterator<Item = &'r AnalysisRecord> + 'r {
        records
            .iter()
            .filter(|r| self.table.position(r.aspect()).is_some())
    }

    /// Overall positive / negative / neutral counts over vocabulary aspects.
    pub fn tally(&self, records: &[AnalysisRecord]) -> SentimentTally {
        let mut tally = SentimentTally::default();
        for record in self.in_vocabulary(records) {
            tally.record(record.polarity());
        }
        tally
    }

    pub fn breakdown(&self, records: &[AnalysisRecord]) -> PerAspect<SentimentTally> {
        self.per_aspect(|aspect| {
            let mut tally = SentimentTally::default();
            for record in records.iter().filter(|r| r.aspect() == aspect) {
                tally.record(record.polarity());
            }
            tally
        })
    }

    pub fn aggregate(&self, records: &[AnalysisRecord]) -> AggregateReport {
        let report = AggregateReport {
            mean_polarity: self.mean_polarity(records),
            negative_samples: self.negative_samples(records),
            by_aspect: self.breakdown(records),
            overall: self.tally(records),
            total_records: self.in_vocabulary(records).count(),
        };
        tracing::debug!(
            records = report.total_records,
            positive = report.overall.positive,
            negative = report.overall.negative,
            "aggregated analysis records"
        );
        report
    }

    /// Pair two reports aspect by aspect.
    pub fn compare(&self, a: &AggregateReport, b: &AggregateReport) -> Result<ComparisonSeries> {
        compare(a, b)
    }
}
