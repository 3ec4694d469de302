//! Text capabilities: sentence segmentation, dependency parsing and word-level
//! preprocessing.

pub mod preprocessing;
pub mod segmenter;
pub mod syntax;

pub use preprocessing::{stem, word_spans, TermFrequency, TextPreprocessor, WordSpan};
pub use segmenter::{RuleSegmenter, SentenceSegmenter};
pub use syntax::{DependencyParser, DependencyRole, HeuristicDependencyParser, SyntaxToken};
