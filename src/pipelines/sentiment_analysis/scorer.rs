use std::sync::Arc;

use serde::Serialize;

use super::model::{SentimentLabel, SentimentModel, SentimentResult};
use crate::core::{AnalysisError, PolarityScore, Result};

/// Whether a polarity came from the model or is a stand-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScoreStatus {
    Scored,
    /// The model failed for this sentence; the polarity is neutral.
    Degraded { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreOutcome {
    pub polarity: PolarityScore,
    pub status: ScoreStatus,
}

impl ScoreOutcome {
    fn scored(polarity: PolarityScore) -> Self {
        Self {
            polarity,
            status: ScoreStatus::Scored,
        }
    }

    fn degraded(reason: impl Into<String>) -> Self {
        Self {
            polarity: PolarityScore::NEUTRAL,
            status: ScoreStatus::Degraded {
                reason: reason.into(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, ScoreStatus::Degraded { .. })
    }
}

/// Turns model output into signed polarity.
///
/// Cheap to clone; clones share the underlying model.
#[derive(Clone)]
pub struct SentimentScorer {
    model: Arc<dyn SentimentModel>,
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer").finish_non_exhaustive()
    }
}

impl SentimentScorer {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self { model }
    }

    pub fn from_model<M: SentimentModel + 'static>(model: M) -> Self {
        Self::new(Arc::new(model))
    }

    /// Run a model loader once; a failed load is [`AnalysisError::ScoringUnavailable`].
    pub fn load<M, F>(loader: F) -> Result<Self>
    where
        M: SentimentModel + 'static,
        F: FnOnce() -> anyhow::Result<M>,
    {
        tracing::info!("loading sentiment model");
        match loader() {
            Ok(model) => {
                tracing::info!("sentiment model loaded");
                Ok(Self::from_model(model))
            }
            Err(err) => {
                tracing::error!("failed to load sentiment model: {err:#}");
                Err(AnalysisError::ScoringUnavailable(format!("{err:#}")))
            }
        }
    }

    /// Negative labels map to `-confidence`, positive to `+confidence`, any
    /// other label to neutral. Confidence is clamped to `[0, 1]`.
    pub fn polarity_of(result: &SentimentResult) -> std::result::Result<PolarityScore, String> {
        if !result.score.is_finite() {
            return Err(format!("non-finite confidence {}", result.score));
        }
        let confidence = result.score.clamp(0.0, 1.0);
        let polarity = match SentimentLabel::parse(&result.label) {
            SentimentLabel::Negative => -confidence,
            SentimentLabel::Positive => confidence,
            SentimentLabel::Neutral => 0.0,
        };
        Ok(PolarityScore::saturating(polarity))
    }

    fn outcome(sentence: &str, result: anyhow::Result<SentimentResult>) -> ScoreOutcome {
        let polarity = result
            .map_err(|err| format!("{err:#}"))
            .and_then(|result| Self::polarity_of(&result));
        match polarity {
            Ok(polarity) => ScoreOutcome::scored(polarity),
            Err(reason) => {
                tracing::warn!(%sentence, "sentiment scoring failed, using neutral polarity: {reason}");
                ScoreOutcome::degraded(reason)
            }
        }
    }

    /// Score one sentence. Never fails: model errors yield a degraded neutral outcome.
    pub fn score(&self, sentence: &str) -> ScoreOutcome {
        Self::outcome(sentence, self.model.predict(sentence))
    }

    /// Score sentences in one model call, in input order.
    ///
    /// If the batch call itself fails or returns the wrong number of results,
    /// every sentence is scored on its own instead.
    pub fn score_batch(&self, sentences: &[&str]) -> Vec<ScoreOutcome> {
        match self.model.predict_batch(sentences) {
            Ok(results) if results.len() == sentences.len() => sentences
                .iter()
                .zip(results)
                .map(|(sentence, result)| Self::outcome(sentence, result))
                .collect(),
            Ok(results) => {
                tracing::warn!(
                    expected = sentences.len(),
                    got = results.len(),
                    "batch scoring returned a mismatched result count, scoring individually"
                );
                sentences.iter().map(|s| self.score(s)).collect()
            }
            Err(err) => {
                tracing::warn!("batch scoring failed, scoring individually: {err:#}");
                sentences.iter().map(|s| self.score(s)).collect()
            }
        }
    }
}
