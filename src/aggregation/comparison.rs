use serde::Serialize;

use super::report::AggregateReport;
use crate::core::{AnalysisError, Result};

/// Mean polarity of both entities for one aspect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectPair {
    pub aspect: String,
    pub a: f64,
    pub b: f64,
}

/// Paired per-aspect series for a radar chart. No winner is computed here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub pairs: Vec<AspectPair>,
}

impl ComparisonSeries {
    pub fn aspects(&self) -> Vec<&str> {
        self.pairs.iter().map(|p| p.aspect.as_str()).collect()
    }

    pub fn a_values(&self) -> Vec<f64> {
        self.pairs.iter().map(|p| p.a).collect()
    }

    pub fn b_values(&self) -> Vec<f64> {
        self.pairs.iter().map(|p| p.b).collect()
    }
}

/// Pair two reports that were built from the same vocabulary.
pub fn compare(a: &AggregateReport, b: &AggregateReport) -> Result<ComparisonSeries> {
    let left: Vec<&str> = a.aspects().collect();
    let right: Vec<&str> = b.aspects().collect();
    if left != right {
        return Err(AnalysisError::VocabularyMismatch {
            left: left.into_iter().map(String::from).collect(),
            right: right.into_iter().map(String::from).collect(),
        });
    }

    let pairs = a
        .mean_polarity()
        .iter()
        .zip(b.mean_polarity().values())
        .map(|((aspect, a), b)| AspectPair {
            aspect: aspect.to_string(),
            a: *a,
            b: *b,
        })
        .collect();

    Ok(ComparisonSeries { pairs })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::aggregation::ResultAggregator;
    use crate::core::{AnalysisRecord, AspectEntry, AspectKeywordTable, AspectLabel, PolarityScore, Sentence};

    fn record(aspect: &str, polarity: f32) -> AnalysisRecord {
        AnalysisRecord::new(
            Sentence::new("some sentence").unwrap(),
            &AspectLabel::Aspect(aspect.into()),
            PolarityScore::new(polarity).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn empty_side_still_pairs_every_aspect() {
        let aggregator = ResultAggregator::new(Arc::new(AspectKeywordTable::reference()));
        let a = aggregator.aggregate(&[]);
        let b = aggregator.aggregate(&[record("Camera", 0.6), record("Value", -0.4)]);

        let series = compare(&a, &b).unwrap();
        assert_eq!(series.pairs.len(), 5);
        assert_eq!(series.a_values(), vec![0.0; 5]);
        let camera = series.pairs.iter().find(|p| p.aspect == "Camera").unwrap();
        assert_eq!(camera.a, 0.0);
        assert!((camera.b - 0.6).abs() < 1e-6);
    }

    #[test]
    fn different_vocabularies_do_not_pair() {
        let phones = ResultAggregator::new(Arc::new(AspectKeywordTable::reference()));
        let coffee = ResultAggregator::new(Arc::new(
            AspectKeywordTable::new(vec![AspectEntry::new("Taste", ["flavor"])]).unwrap(),
        ));
        let err = compare(&phones.aggregate(&[]), &coffee.aggregate(&[])).unwrap_err();
        assert!(matches!(err, AnalysisError::VocabularyMismatch { .. }));
    }
}
