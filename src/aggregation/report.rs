use serde::Serialize;

use crate::core::PolarityScore;
use crate::text::{TermFrequency, TextPreprocessor};

/// A value for one aspect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectValue<T> {
    pub aspect: String,
    pub value: T,
}

/// One value per vocabulary aspect, in vocabulary order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PerAspect<T> {
    entries: Vec<AspectValue<T>>,
}

impl<T> PerAspect<T> {
    pub(crate) fn new(entries: Vec<AspectValue<T>>) -> Self {
        Self { entries }
    }

    pub fn get(&self, aspect: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|e| e.aspect == aspect)
            .map(|e| &e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|e| (e.aspect.as_str(), &e.value))
    }

    pub fn aspects(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.aspect.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Positive / negative / neutral record counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentTally {
    pub fn record(&mut self, polarity: PolarityScore) {
        if polarity.is_positive() {
            self.positive += 1;
        } else if polarity.is_negative() {
            self.negative += 1;
        } else {
            self.neutral += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Strongly negative sentences of one aspect, joined for term-frequency views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegativeSample {
    pub aspect: String,
    /// Qualifying sentences joined with single spaces. Empty when none qualified.
    pub text: String,
    pub sentence_count: usize,
}

impl NegativeSample {
    pub fn is_empty(&self) -> bool {
        self.sentence_count == 0
    }

    /// Word-cloud input: content-word counts of the sample text.
    pub fn term_frequencies(&self, preprocessor: &TextPreprocessor) -> Vec<TermFrequency> {
        preprocessor.term_frequencies(&self.text)
    }
}

/// Everything derived from one entity's records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub(crate) mean_polarity: PerAspect<f64>,
    pub(crate) negative_samples: PerAspect<NegativeSample>,
    pub(crate) by_aspect: PerAspect<SentimentTally>,
    pub(crate) overall: SentimentTally,
    pub(crate) total_records: usize,
}

impl AggregateReport {
    /// Mean polarity per aspect; aspects without records are `0.0`.
    pub fn mean_polarity(&self) -> &PerAspect<f64> {
        &self.mean_polarity
    }

    pub fn negative_samples(&self) -> &PerAspect<NegativeSample> {
        &self.negative_samples
    }

    /// `None` when no sentence of `aspect` fell below the negative threshold.
    pub fn negative_sample(&self, aspect: &str) -> Option<&NegativeSample> {
        self.negative_samples
            .get(aspect)
            .filter(|sample| !sample.is_empty())
    }

    pub fn by_aspect(&self) -> &PerAspect<SentimentTally> {
        &self.by_aspect
    }

    pub fn overall(&self) -> SentimentTally {
        self.overall
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn aspects(&self) -> impl Iterator<Item = &str> {
        self.mean_polarity.aspects()
    }
}
