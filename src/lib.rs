//! Aspect-based sentiment analysis for competitive product comparison.
//!
//! Review text is split into sentences, each sentence is assigned to one product
//! aspect from a configurable vocabulary, classified sentences are scored by an
//! external sentiment model, and the resulting records are aggregated into
//! per-aspect statistics that line up across two compared entities.

pub mod aggregation;
pub mod core;
pub mod pipelines;
pub mod text;

// Re-export core types
pub use crate::core::{
    AnalysisConfig, AnalysisError, AnalysisRecord, AspectEntry, AspectKeywordTable, AspectLabel,
    PolarityScore, Sentence,
};

pub use aggregation::{AggregateReport, ComparisonSeries, ResultAggregator};
pub use pipelines::{
    AnalysisPipeline, AnalysisPipelineBuilder, AnalysisRun, AspectClassifier, EntityComparison,
    EntityReport, EntityText, SentimentModel, SentimentResult, SentimentScorer,
};
