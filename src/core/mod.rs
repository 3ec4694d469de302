pub mod config;
pub mod error;
pub mod types;

pub use config::{AnalysisConfig, AspectEntry, AspectKeywordTable};
pub use error::{AnalysisError, Result};
pub use types::{AnalysisRecord, AspectLabel, PolarityScore, Sentence, UNCLASSIFIED};
