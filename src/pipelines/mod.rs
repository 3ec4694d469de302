// Pipeline modules organized by functionality
pub mod aspect_analysis;
pub mod aspect_classification;
pub mod sentiment_analysis;

pub use aspect_analysis::*;
pub use aspect_classification::*;
pub use sentiment_analysis::*;
