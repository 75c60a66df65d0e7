//! yomi-api サーバーエントリーポイント

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yomi::{EngineHandle, IchiranCliEngine, LifecycleManager, SharedState};
use yomi_api::api::{AppState, run_server};
use yomi_api::config::Config;
use yomi_api::service::{AnalyzeService, Dispatcher};
use yomi_api::ApiError;
use yomi_api::shutdown::ShutdownCoordinator;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // ロギングの初期化
  tracing_subscriber::registry().with(tracing_subscriber::fmt::layer()).init();

  // 設定の読み込み
  let config = Config::from_env()?;
  tracing::info!(port = config.port, "設定を読み込みました");

  // エンジンハンドルの作成（この時点ではまだ初期化しない）
  let engine: Arc<dyn EngineHandle> = Arc::new(
    IchiranCliEngine::new(&config.engine_command)
      .map_err(|e| ApiError::config(e.to_string()))?,
  );

  // 準備状態セルとライフサイクルマネージャー
  let state_cell = SharedState::new();
  let manager =
    LifecycleManager::new(state_cell.clone(), Arc::clone(&engine), config.init);

  // 初期化はバックグラウンドで進める。リスナーは即座に起動する
  let _init_task = manager.start();
  tracing::info!("エンジン初期化タスクを起動しました");

  // ディスパッチャーとアプリケーション状態
  let gate = manager.gate();
  let dispatcher: Arc<dyn AnalyzeService> = Arc::new(Dispatcher::new(
    gate.clone(),
    Arc::clone(&engine),
    config.analyze_timeout,
    config.translit_limit,
  ));

  let coordinator = ShutdownCoordinator::new(state_cell, engine, config.shutdown_grace);
  let state = AppState::new(config, dispatcher, gate);

  // サーバー起動（シグナル受信で秩序立ったシャットダウン）
  run_server(state, coordinator).await
}
