//! Sentiment scoring for classified sentences.
//!
//! The sentiment model itself is an external capability behind
//! [`SentimentModel`]. [`SentimentScorer`] wraps a loaded model and normalizes its
//! `(label, confidence)` output into a signed [`PolarityScore`](crate::core::PolarityScore).
//!
//! ## Usage Example
//!
//! ```rust
//! use aspect_pulse::pipelines::sentiment_analysis::*;
//!
//! struct AlwaysNegative;
//!
//! impl SentimentModel for AlwaysNegative {
//!     fn predict(&self, _text: &str) -> anyhow::Result<SentimentResult> {
//!         Ok(SentimentResult::new("NEGATIVE", 0.8))
//!     }
//! }
//!
//! let scorer = SentimentScorer::load(|| anyhow::Ok(AlwaysNegative))?;
//! let outcome = scorer.score("The battery died after an hour.");
//! assert_eq!(outcome.polarity.value(), -0.8);
//! # anyhow::Ok(())
//! ```

pub mod model;
pub mod scorer;

pub use model::{SentimentLabel, SentimentModel, SentimentResult};
pub use scorer::{ScoreOutcome, ScoreStatus, SentimentScorer};
