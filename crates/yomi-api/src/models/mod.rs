//! models module
mod request;
mod response;

pub use request::{AnalyzeQuery, AnalyzeRequest};
pub use response::AnalyzeResponse;
