//! service module
mod dispatcher;

pub use dispatcher::{AnalyzeService, Dispatcher};
