use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the sentinel label for sentences that match no aspect.
pub const UNCLASSIFIED: &str = "Unclassified";

/// A single sentence produced by segmentation. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sentence(String);

impl Sentence {
    /// Returns `None` for empty or whitespace-only text.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of aspect classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AspectLabel {
    Aspect(String),
    Unclassified,
}

impl AspectLabel {
    pub fn as_str(&self) -> &str {
        match self {
            AspectLabel::Aspect(name) => name,
            AspectLabel::Unclassified => UNCLASSIFIED,
        }
    }

    pub fn is_unclassified(&self) -> bool {
        matches!(self, AspectLabel::Unclassified)
    }

    /// The aspect name, or `None` for [`AspectLabel::Unclassified`].
    pub fn aspect(&self) -> Option<&str> {
        match self {
            AspectLabel::Aspect(name) => Some(name),
            AspectLabel::Unclassified => None,
        }
    }
}

impl fmt::Display for AspectLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed sentiment in `[-1.0, 1.0]`; `0.0` means "no signal".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct PolarityScore(f32);

impl PolarityScore {
    pub const NEUTRAL: PolarityScore = PolarityScore(0.0);

    /// Returns `None` when `value` is non-finite or outside `[-1.0, 1.0]`.
    pub fn new(value: f32) -> Option<Self> {
        if value.is_finite() && (-1.0..=1.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Clamp a finite value into range; non-finite values become neutral.
    pub fn saturating(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(-1.0, 1.0))
        } else {
            Self::NEUTRAL
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }
}

impl TryFrom<f32> for PolarityScore {
    type Error = String;

    fn try_from(value: f32) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("polarity {value} is outside [-1, 1]"))
    }
}

impl From<PolarityScore> for f32 {
    fn from(score: PolarityScore) -> Self {
        score.0
    }
}

impl fmt::Display for PolarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// One classified and scored sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    sentence: Sentence,
    aspect: String,
    polarity: PolarityScore,
}

impl AnalysisRecord {
    /// Records only exist for classified sentences, so an unclassified label yields `None`.
    pub fn new(sentence: Sentence, aspect: &AspectLabel, polarity: PolarityScore) -> Option<Self> {
        let aspect = aspect.aspect()?.to_string();
        Some(Self {
            sentence,
            aspect,
            polarity,
        })
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn aspect(&self) -> &str {
        &self.aspect
    }

    pub fn polarity(&self) -> PolarityScore {
        self.polarity
    }
}
