//! models module
pub mod model_definition;

/// Re-export major model types
pub use model_definition::{AnalysisResult, AnalysisToken, Gloss};
