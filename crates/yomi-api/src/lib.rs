//! yomi-api crate
//!
//! Web server exposing Japanese text analysis as an HTTP API.
//! The analysis engine starts slowly and can fail; the server starts
//! listening immediately and gates requests on engine readiness.
//!
//! ## Endpoints
//! - `POST /analyze` - Text analysis (JSON body or `?text=` query)
//! - `GET /health` - Readiness probe (503 until the engine is ready)
//! - `GET /` - Service description
//!
//! ## Usage Example
//! ```bash
//! curl -X POST http://127.0.0.1:8080/analyze \
//!   -H "Content-Type: application/json" \
//!   -d '{"text": "本を読む"}'
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;
pub mod shutdown;

pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use models::{AnalyzeQuery, AnalyzeRequest, AnalyzeResponse};
pub use service::{AnalyzeService, Dispatcher};
pub use shutdown::ShutdownCoordinator;
