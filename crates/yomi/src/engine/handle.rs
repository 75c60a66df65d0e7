//! Engine Handle Contract
//!
//! The analysis engine is an external collaborator: it owns
//! tokenization, romanization and gloss lookup. This crate only talks
//! to it through the [`EngineHandle`] trait, which keeps the lifecycle
//! and dispatch layers testable with scripted stub engines.

use async_trait::async_trait;

use crate::errors::EngineResult;
use crate::models::AnalysisResult;

/// Common interface to the external analysis engine
///
/// Implementations must be safe for concurrent `analyze` calls; the
/// only initialization-time mutation is the one-shot state transition
/// guarded by the lifecycle manager, so no further synchronization is
/// layered on top here.
///
/// Deadlines are applied by callers with `tokio::time::timeout`:
/// the lifecycle manager bounds `initialize`, the request dispatcher
/// bounds `analyze`. Implementations therefore must be cancel-safe.
#[async_trait]
pub trait EngineHandle: Send + Sync {
  /// Brings the engine to a servable state
  ///
  /// May be very slow on a cold engine. Must be idempotent so the
  /// lifecycle manager can retry it after transient failures.
  ///
  /// # Errors
  /// Returns an error if the engine cannot reach a servable state.
  async fn initialize(&self) -> EngineResult<()>;

  /// Analyzes one input text
  ///
  /// Pure function of `text` once the engine is ready.
  ///
  /// # Errors
  /// Returns an error if the engine call fails or its output cannot be
  /// decoded.
  async fn analyze(&self, text: &str) -> EngineResult<AnalysisResult>;

  /// Releases engine resources
  ///
  /// Called exactly once, strictly after the HTTP listener has stopped
  /// accepting connections.
  async fn shutdown(&self);
}
