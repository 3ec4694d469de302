//! Aspect vocabulary and analysis tunables.
//!
//! Both are plain values handed to the classifier, pipeline and aggregator, so
//! several product domains can be analysed side by side in one process.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{AnalysisError, Result};
use super::types::UNCLASSIFIED;

/// One aspect of the vocabulary together with its trigger keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectEntry {
    pub aspect: String,
    pub keywords: Vec<String>,
}

impl AspectEntry {
    pub fn new<S: Into<String>>(aspect: impl Into<String>, keywords: impl IntoIterator<Item = S>) -> Self {
        Self {
            aspect: aspect.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered mapping from aspect name to lowercase trigger keywords.
///
/// The entry order is the vocabulary order: it breaks ties during classification
/// and fixes the order of every per-aspect output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AspectKeywordTable {
    entries: Vec<AspectEntry>,
}

impl AspectKeywordTable {
    /// Validate and normalize a table.
    pub fn new(entries: Vec<AspectEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AnalysisError::Configuration(
                "aspect keyword table is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(entries.len());

        for entry in entries {
            let aspect = entry.aspect.trim().to_string();
            if aspect.is_empty() {
                return Err(AnalysisError::Configuration(
                    "aspect name must not be blank".to_string(),
                ));
            }
            if aspect.eq_ignore_ascii_case(UNCLASSIFIED) {
                return Err(AnalysisError::Configuration(format!(
                    "'{aspect}' is reserved and cannot be configured as an aspect"
                )));
            }
            if !seen.insert(aspect.to_lowercase()) {
                return Err(AnalysisError::Configuration(format!(
                    "aspect '{aspect}' is configured more than once"
                )));
            }
            if entry.keywords.is_empty() {
                return Err(AnalysisError::Configuration(format!(
                    "aspect '{aspect}' has no keywords"
                )));
            }

            let mut keywords = Vec::with_capacity(entry.keywords.len());
            for keyword in entry.keywords {
                let keyword = keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(AnalysisError::Configuration(format!(
                        "aspect '{aspect}' has a blank keyword"
                    )));
                }
                if !keywords.contains(&keyword) {
                    keywords.push(keyword);
                }
            }

            normalized.push(AspectEntry { aspect, keywords });
        }

        Ok(Self {
            entries: normalized,
        })
    }

    /// Parse a JSON array of `{"aspect": ..., "keywords": [...]}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<AspectEntry> = serde_json::from_str(json).map_err(|e| {
            AnalysisError::Configuration(format!("malformed aspect keyword table: {e}"))
        })?;
        Self::new(entries)
    }

    /// The phone-review vocabulary.
    pub fn reference() -> Self {
        let entries = vec![
            AspectEntry::new(
                "Battery",
                ["battery", "charging", "power", "mah", "charger", "lasts", "charge"],
            ),
            AspectEntry::new(
                "Camera",
                ["camera", "photo", "picture", "video", "lens", "zoom", "selfie", "portraits"],
            ),
            AspectEntry::new(
                "Display",
                ["display", "screen", "oled", "amoled", "refresh rate", "brightness", "pixels"],
            ),
            AspectEntry::new(
                "Performance",
                ["performance", "speed", "fast", "slow", "lag", "smooth", "processor", "ram", "gaming"],
            ),
            AspectEntry::new(
                "Value",
                ["price", "value", "cheap", "expensive", "cost", "worth", "budget"],
            ),
        ];
        Self { entries }
    }

    /// Aspect names in vocabulary order.
    pub fn aspects(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.aspect.as_str())
    }

    pub fn entries(&self) -> &[AspectEntry] {
        &self.entries
    }

    pub fn keywords(&self, aspect: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.aspect == aspect)
            .map(|e| e.keywords.as_slice())
    }

    /// Position of `aspect` in the vocabulary.
    pub fn position(&self, aspect: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.aspect == aspect)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AspectKeywordTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl<'de> Deserialize<'de> for AspectKeywordTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<AspectEntry>::deserialize(deserializer)?;
        AspectKeywordTable::new(entries).map_err(serde::de::Error::custom)
    }
}

fn default_min_sentence_chars() -> usize {
    3
}

fn default_negative_threshold() -> f32 {
    -0.5
}

fn default_batch_size() -> usize {
    16
}

/// Tunables for a pipeline run and for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Sentences whose trimmed text has fewer characters are skipped as fragments.
    #[serde(default = "default_min_sentence_chars")]
    pub min_sentence_chars: usize,
    /// Records strictly below this polarity feed the negative samples.
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f32,
    /// Number of sentences sent to the sentiment model per call.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Optional bound on input length, in characters.
    #[serde(default)]
    pub max_input_chars: Option<usize>,
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            AnalysisError::Configuration(format!("malformed analysis config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(AnalysisError::Configuration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.negative_threshold) {
            return Err(AnalysisError::Configuration(format!(
                "negative_threshold {} is outside [-1, 1]",
                self.negative_threshold
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_sentence_chars: default_min_sentence_chars(),
            negative_threshold: default_negative_threshold(),
            batch_size: default_batch_size(),
            max_input_chars: None,
        }
    }
}
