//! ルーター定義とサーバー起動

use axum::{
  Router,
  routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{get_index, health_check, post_analyze};
use super::state::AppState;
use crate::errors::ApiError;
use crate::shutdown::{ShutdownCoordinator, wait_for_signal};

/// APIルーターを作成する
///
/// # Arguments
/// * `state` - アプリケーション状態
///
/// # Returns
/// 設定済みの Router
pub fn create_router(state: AppState) -> Router {
  Router::new()
    .route("/", get(get_index))
    .route("/analyze", post(post_analyze))
    .route("/health", get(health_check))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// サーバーを起動し、終了シグナルで秩序立ったシャットダウンを行う
///
/// リスナーは即座に受け付けを開始する（エンジン初期化は別タスクで
/// 進み、準備完了まではゲートが 503 を返す）。シグナル受信後の
/// 手順はシャットダウンコーディネーターが引き継ぐ。
///
/// # Errors
/// バインドに失敗した場合にエラーを返す
pub async fn run_server(state: AppState, coordinator: ShutdownCoordinator) -> crate::errors::Result<()> {
  let addr = state.config.bind_addr();
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .map_err(|e| ApiError::config(format!("バインドに失敗しました: {}", e)))?;

  info!("サーバーを起動します: http://{}", addr);

  let router = create_router(state);

  // 受け付け停止用のチャンネル。送信でリスナーが新規接続を閉じる
  let (stop_accepting_tx, stop_accepting_rx) = tokio::sync::oneshot::channel::<()>();

  let server = tokio::spawn(async move {
    axum::serve(listener, router)
      .with_graceful_shutdown(async move {
        let _ = stop_accepting_rx.await;
      })
      .await
  });

  wait_for_signal().await;

  coordinator.run(stop_accepting_tx, server).await;

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::config::Config;
  use crate::errors::Result as ApiResult;
  use crate::models::{AnalyzeRequest, AnalyzeResponse};
  use crate::service::AnalyzeService;
  use async_trait::async_trait;
  use yomi::SharedState;
  use yomi::models::AnalysisResult;

  /// テスト用のダミー実装（エンジンを一切触らない）
  struct DummyService;

  #[async_trait]
  impl AnalyzeService for DummyService {
    async fn analyze(&self, _request: AnalyzeRequest) -> ApiResult<AnalyzeResponse> {
      Ok(AnalyzeResponse::from_analysis(&AnalysisResult::default(), 1000))
    }
  }

  fn create_test_state() -> AppState {
    let config = Config::for_tests();

    // スタブを注入（エンジン不要）
    let service = Arc::new(DummyService) as Arc<dyn AnalyzeService>;
    AppState::new(config, service, SharedState::new().gate())
  }

  #[test]
  fn test_router_creation() {
    let state = create_test_state();
    let _router = create_router(state);
    // ルーターが正常に作成できることを確認
  }
}
