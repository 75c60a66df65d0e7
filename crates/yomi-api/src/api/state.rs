//! API State Definition

use std::sync::Arc;

use yomi::ReadinessGate;

use crate::config::Config;
use crate::service::AnalyzeService;

/// Application State
///
/// State shared across the entire server.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Analysis dispatch service
  ///
  /// - Production: `Arc::new(Dispatcher::new(..))`
  /// - Test: `Arc::new(StubAnalyzeService)`
  pub service: Arc<dyn AnalyzeService>,
  /// Readiness gate shared with the lifecycle manager
  pub gate: ReadinessGate,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, service: Arc<dyn AnalyzeService>, gate: ReadinessGate) -> Self {
    Self { config, service, gate }
  }
}
