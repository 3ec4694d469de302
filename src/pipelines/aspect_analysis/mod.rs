//! End-to-end aspect analysis: segment raw text, classify each sentence into
//! an aspect, score the classified sentences and collect records.
//!
//! ## Main Types
//!
//! - [`AnalysisPipelineBuilder`] - configures capabilities and tunables
//! - [`AnalysisPipeline`] - runs the analysis for one or two entities
//! - [`AnalysisRun`] - ordered records plus run counters
//!
//! ## Usage Example
//!
//! ```rust
//! use aspect_pulse::pipelines::aspect_analysis::*;
//! use aspect_pulse::pipelines::sentiment_analysis::{SentimentModel, SentimentResult};
//!
//! struct Lukewarm;
//!
//! impl SentimentModel for Lukewarm {
//!     fn predict(&self, _text: &str) -> anyhow::Result<SentimentResult> {
//!         Ok(SentimentResult::new("POSITIVE", 0.6))
//!     }
//! }
//!
//! let pipeline = AnalysisPipelineBuilder::reference()
//!     .scorer_loader(|| anyhow::Ok(Lukewarm))
//!     .build()?;
//!
//! let run = pipeline.analyze("The screen is gorgeous. Nice box. Battery lasts two days.")?;
//! let aspects: Vec<_> = run.records().iter().map(|r| r.aspect()).collect();
//! assert_eq!(aspects, ["Display", "Battery"]);
//! # anyhow::Ok(())
//! ```

pub mod builder;
pub mod paired;
pub mod pipeline;

pub use builder::AnalysisPipelineBuilder;
pub use paired::{EntityComparison, EntityReport, EntityText};
pub use pipeline::{AnalysisPipeline, AnalysisRun};
