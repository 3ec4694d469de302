use serde::{Deserialize, Serialize};

/// Raw output of a sentiment model: a label and its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// The predicted sentiment (e.g. "POSITIVE", "NEGATIVE").
    pub label: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

impl SentimentResult {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Direction of a sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Case-insensitive: anything mentioning `neg` is negative, `pos` positive,
    /// everything else neutral.
    pub fn parse(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("neg") {
            SentimentLabel::Negative
        } else if label.contains("pos") {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// External sentiment capability.
///
/// Implementations wrap whatever actually produces the label (a transformer
/// model, a remote service, a lexicon). They may block.
pub trait SentimentModel: Send + Sync {
    fn predict(&self, text: &str) -> anyhow::Result<SentimentResult>;

    /// Score several texts in one call. The outer error means the whole call
    /// failed; inner errors are per text.
    fn predict_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<anyhow::Result<SentimentResult>>> {
        Ok(texts.iter().map(|text| self.predict(text)).collect())
    }
}
