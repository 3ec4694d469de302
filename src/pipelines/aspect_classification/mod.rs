//! Rule-based aspect classification.
//!
//! Keyword matching against an [`AspectKeywordTable`](crate::core::AspectKeywordTable)
//! with syntactic-subject tie-breaking.
//!
//! ```rust
//! use std::sync::Arc;
//! use aspect_pulse::core::{AspectKeywordTable, AspectLabel};
//! use aspect_pulse::pipelines::aspect_classification::AspectClassifier;
//!
//! let classifier = AspectClassifier::new(Arc::new(AspectKeywordTable::reference()));
//! assert_eq!(
//!     classifier.classify("For the price, this phone is an absolute steal."),
//!     AspectLabel::Aspect("Value".to_string())
//! );
//! ```

pub mod classifier;

pub use classifier::AspectClassifier;
