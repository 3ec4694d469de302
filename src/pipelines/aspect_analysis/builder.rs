use std::sync::Arc;

use super::pipeline::AnalysisPipeline;
use crate::core::{AnalysisConfig, AnalysisError, AspectKeywordTable, Result};
use crate::pipelines::aspect_classification::AspectClassifier;
use crate::pipelines::sentiment_analysis::{SentimentModel, SentimentScorer};
use crate::text::{DependencyParser, HeuristicDependencyParser, RuleSegmenter, SentenceSegmenter};

type ScorerLoader = Box<dyn FnOnce() -> Result<SentimentScorer> + Send>;

enum ParserRequest {
    Default,
    Custom(Arc<dyn DependencyParser>),
    Disabled,
}

enum ScorerRequest {
    Missing,
    Ready(SentimentScorer),
    Load(ScorerLoader),
}

/// Builder for [`AnalysisPipeline`].
///
/// Defaults: [`RuleSegmenter`], [`HeuristicDependencyParser`] and
/// [`AnalysisConfig::default`]. A sentiment model is required.
pub struct AnalysisPipelineBuilder {
    table: AspectKeywordTable,
    config: AnalysisConfig,
    segmenter: Option<Arc<dyn SentenceSegmenter>>,
    parser: ParserRequest,
    scorer: ScorerRequest,
}

impl AnalysisPipelineBuilder {
    pub fn new(table: AspectKeywordTable) -> Self {
        Self {
            table,
            config: AnalysisConfig::default(),
            segmenter: None,
            parser: ParserRequest::Default,
            scorer: ScorerRequest::Missing,
        }
    }

    /// Builder over the phone-review vocabulary.
    pub fn reference() -> Self {
        Self::new(AspectKeywordTable::reference())
    }

    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn min_sentence_chars(mut self, chars: usize) -> Self {
        self.config.min_sentence_chars = chars;
        self
    }

    pub fn negative_threshold(mut self, threshold: f32) -> Self {
        self.config.negative_threshold = threshold;
        self
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size;
        self
    }

    pub fn max_input_chars(mut self, max: usize) -> Self {
        self.config.max_input_chars = Some(max);
        self
    }

    pub fn segmenter(mut self, segmenter: impl SentenceSegmenter + 'static) -> Self {
        self.segmenter = Some(Arc::new(segmenter));
        self
    }

    pub fn parser(mut self, parser: impl DependencyParser + 'static) -> Self {
        self.parser = ParserRequest::Custom(Arc::new(parser));
        self
    }

    /// Disable subject disambiguation; ties fall back to vocabulary order.
    pub fn no_parser(mut self) -> Self {
        self.parser = ParserRequest::Disabled;
        self
    }

    pub fn scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = ScorerRequest::Ready(scorer);
        self
    }

    pub fn model(self, model: impl SentimentModel + 'static) -> Self {
        self.scorer(SentimentScorer::from_model(model))
    }

    /// Load the sentiment model during [`build`](Self::build).
    pub fn scorer_loader<M, F>(mut self, loader: F) -> Self
    where
        M: SentimentModel + 'static,
        F: FnOnce() -> anyhow::Result<M> + Send + 'static,
    {
        self.scorer = ScorerRequest::Load(Box::new(move || SentimentScorer::load(loader)));
        self
    }

    /// Fails with [`AnalysisError::Configuration`] on invalid tunables and with
    /// [`AnalysisError::ScoringUnavailable`] when no model is set or it fails to load.
    pub fn build(self) -> Result<AnalysisPipeline> {
        self.config.validate()?;

        let scorer = match self.scorer {
            ScorerRequest::Ready(scorer) => scorer,
            ScorerRequest::Load(loader) => loader()?,
            ScorerRequest::Missing => {
                return Err(AnalysisError::ScoringUnavailable(
                    "no sentiment model configured".to_string(),
                ))
            }
        };

        let table = Arc::new(self.table);
        let parser: Option<Arc<dyn DependencyParser>> = match self.parser {
            ParserRequest::Default => Some(Arc::new(HeuristicDependencyParser::new())),
            ParserRequest::Custom(parser) => Some(parser),
            ParserRequest::Disabled => None,
        };

        Ok(AnalysisPipeline {
            classifier: AspectClassifier::with_parser(Arc::clone(&table), parser),
            table,
            config: self.config,
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Arc::new(RuleSegmenter::new()) as Arc<dyn SentenceSegmenter>),
            scorer,
        })
    }
}
