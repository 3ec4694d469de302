//! Per-aspect statistics over analysis records and cross-entity pairing.

pub mod aggregator;
pub mod comparison;
pub mod report;

pub use aggregator::ResultAggregator;
pub use comparison::{compare, AspectPair, ComparisonSeries};
pub use report::{AggregateReport, AspectValue, NegativeSample, PerAspect, SentimentTally};
