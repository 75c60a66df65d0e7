//! Request Dispatcher
//!
//! Turns a validated analysis request into a response, or a precise
//! error. Stateless across requests; the only side effect is the single
//! engine call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, error};

use yomi::errors::EngineError;
use yomi::{EngineHandle, ReadinessGate};

use crate::config::MAX_TEXT_LENGTH;
use crate::errors::{ApiError, Result};
use crate::models::{AnalyzeRequest, AnalyzeResponse};

/// Common interface for the analysis dispatch path
///
/// This trait allows swapping the production [`Dispatcher`] with test
/// stubs in the HTTP layer.
#[async_trait]
pub trait AnalyzeService: Send + Sync {
  /// Executes one analysis request
  ///
  /// # Errors
  /// - `NotReady` while the engine is not servable
  /// - `InvalidInput` / `TextTooLong` for rejected input
  /// - `AnalysisFailed` when the engine call errors or times out
  async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse>;
}

/// Production dispatcher
///
/// Order of checks is part of the contract: the readiness gate is
/// consulted before any validation or engine work, so a not-ready
/// service never touches the engine.
pub struct Dispatcher {
  gate: ReadinessGate,
  engine: Arc<dyn EngineHandle>,
  analyze_timeout: Duration,
  translit_limit: usize,
}

impl Dispatcher {
  /// Creates a dispatcher
  #[must_use]
  pub fn new(
    gate: ReadinessGate,
    engine: Arc<dyn EngineHandle>,
    analyze_timeout: Duration,
    translit_limit: usize,
  ) -> Self {
    Self { gate, engine, analyze_timeout, translit_limit }
  }
}

#[async_trait]
impl AnalyzeService for Dispatcher {
  async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse> {
    if !self.gate.is_ready() {
      debug!(state = %self.gate.state(), "準備未完了のためリクエストを拒否します");
      return Err(ApiError::NotReady);
    }

    let text_bytes = request.text.len();
    if text_bytes == 0 {
      return Err(ApiError::invalid_input("テキストが空です"));
    }
    if text_bytes > MAX_TEXT_LENGTH {
      return Err(ApiError::text_too_long(text_bytes, MAX_TEXT_LENGTH));
    }

    // デッドライン超過はハングではなく AnalysisFailed として表面化する。
    // クライアント切断時は axum がハンドラーごと打ち切る。
    let result = match timeout(self.analyze_timeout, self.engine.analyze(&request.text)).await {
      Ok(Ok(result)) => result,
      Ok(Err(err)) => {
        // 原因はログにのみ残す
        error!(error = %err, "エンジン解析が失敗しました");
        return Err(ApiError::AnalysisFailed);
      }
      Err(_) => {
        error!(
          timeout_secs = self.analyze_timeout.as_secs(),
          "エンジン解析がデッドラインを超過しました"
        );
        return Err(EngineError::Timeout.into());
      }
    };

    Ok(AnalyzeResponse::from_analysis(&result, self.translit_limit))
  }
}
