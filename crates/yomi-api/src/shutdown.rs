//! Shutdown Coordinator
//!
//! Enforces the teardown order: publish ShuttingDown (new requests are
//! rejected by the readiness gate), stop the listener, give in-flight
//! requests a bounded grace period, and only then release the engine.
//! Releasing the engine while the listener still serves would race
//! requests against a half-closed engine.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{info, warn};

use yomi::{EngineHandle, SharedState};

/// Waits for a termination signal (Ctrl-C, or SIGTERM on unix)
pub async fn wait_for_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      warn!(error = %e, "Ctrl-C ハンドラーの登録に失敗しました");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut signal) => {
        signal.recv().await;
      }
      Err(e) => {
        warn!(error = %e, "SIGTERM ハンドラーの登録に失敗しました");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => info!("Ctrl-C を受信しました"),
    () = terminate => info!("SIGTERM を受信しました"),
  }
}

/// Coordinates the ordered teardown sequence
///
/// Teardown runs at most once per process; duplicate triggers are
/// idempotent no-ops.
pub struct ShutdownCoordinator {
  state: SharedState,
  engine: Arc<dyn EngineHandle>,
  grace: Duration,
  begun: AtomicBool,
}

impl ShutdownCoordinator {
  /// Creates a coordinator
  #[must_use]
  pub fn new(state: SharedState, engine: Arc<dyn EngineHandle>, grace: Duration) -> Self {
    Self { state, engine, grace, begun: AtomicBool::new(false) }
  }

  /// Marks teardown as begun; returns `true` only for the first caller
  pub fn begin(&self) -> bool {
    !self.begun.swap(true, Ordering::SeqCst)
  }

  /// Runs the teardown sequence
  ///
  /// `stop_accepting` closes the listener to new connections;
  /// `server` is the serve task, which completes once in-flight
  /// requests have drained. If the grace period elapses first the task
  /// is aborted, force-closing the remaining connections. The engine is
  /// released strictly after the serve task has ended either way.
  pub async fn run(
    &self,
    stop_accepting: oneshot::Sender<()>,
    server: JoinHandle<io::Result<()>>,
  ) {
    if !self.begin() {
      info!("シャットダウンはすでに進行中です");
      return;
    }

    let prior = self.state.begin_shutdown();
    info!(prior_state = %prior, grace_secs = self.grace.as_secs(), "シャットダウンを開始します");

    // 新規接続の受け付けを止める
    let _ = stop_accepting.send(());

    let mut server = server;
    match timeout(self.grace, &mut server).await {
      Ok(Ok(Ok(()))) => info!("処理中のリクエストがすべて完了しました"),
      Ok(Ok(Err(e))) => warn!(error = %e, "サーバーがエラーで終了しました"),
      Ok(Err(e)) => warn!(error = %e, "サーバータスクの join に失敗しました"),
      Err(_) => {
        warn!("猶予期間を超過したため残りの接続を強制切断します");
        server.abort();
        let _ = server.await;
      }
    }

    // リスナーが完全に止まった後にのみエンジンを解放する
    self.engine.shutdown().await;
    info!("シャットダウン完了");
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::AtomicU32;

  use super::*;
  use async_trait::async_trait;
  use yomi::ServiceState;
  use yomi::errors::EngineResult;
  use yomi::models::AnalysisResult;

  /// shutdown 呼び出し回数を数えるエンジン
  struct TrackingEngine {
    shutdown_calls: AtomicU32,
  }

  impl TrackingEngine {
    fn new() -> Arc<Self> {
      Arc::new(Self { shutdown_calls: AtomicU32::new(0) })
    }

    fn shutdowns(&self) -> u32 {
      self.shutdown_calls.load(Ordering::SeqCst)
    }
  }

  #[async_trait]
  impl EngineHandle for TrackingEngine {
    async fn initialize(&self) -> EngineResult<()> {
      Ok(())
    }

    async fn analyze(&self, _text: &str) -> EngineResult<AnalysisResult> {
      Ok(AnalysisResult::default())
    }

    async fn shutdown(&self) {
      self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
    }
  }

  fn drained_server(rx: oneshot::Receiver<()>) -> JoinHandle<io::Result<()>> {
    tokio::spawn(async move {
      let _ = rx.await;
      Ok(())
    })
  }

  #[tokio::test]
  async fn teardown_publishes_shutting_down_then_releases_engine() {
    let engine = TrackingEngine::new();
    let state = SharedState::new();
    let coordinator =
      ShutdownCoordinator::new(state.clone(), engine.clone(), Duration::from_secs(5));

    let (tx, rx) = oneshot::channel();
    coordinator.run(tx, drained_server(rx)).await;

    assert_eq!(state.load(), ServiceState::ShuttingDown);
    assert_eq!(engine.shutdowns(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn grace_period_expiry_force_closes() {
    let engine = TrackingEngine::new();
    let state = SharedState::new();
    let coordinator =
      ShutdownCoordinator::new(state.clone(), engine.clone(), Duration::from_secs(5));

    // 受け付け停止を無視して居座るサーバータスク
    let server: JoinHandle<io::Result<()>> = tokio::spawn(async {
      tokio::time::sleep(Duration::from_secs(3600)).await;
      Ok(())
    });

    let (tx, _rx) = oneshot::channel();
    let started = tokio::time::Instant::now();
    coordinator.run(tx, server).await;

    // 猶予期間の経過後に強制終了し、その後エンジンを解放する
    assert_eq!(started.elapsed(), Duration::from_secs(5));
    assert_eq!(engine.shutdowns(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn in_flight_request_drains_within_grace() {
    let engine = TrackingEngine::new();
    let state = SharedState::new();
    let coordinator =
      ShutdownCoordinator::new(state.clone(), engine.clone(), Duration::from_secs(5));

    // 受け付け停止後、処理中のリクエストに 1 秒かかるサーバータスク
    let (tx, rx) = oneshot::channel::<()>();
    let server: JoinHandle<io::Result<()>> = tokio::spawn(async move {
      let _ = rx.await;
      tokio::time::sleep(Duration::from_secs(1)).await;
      Ok(())
    });

    let started = tokio::time::Instant::now();
    coordinator.run(tx, server).await;

    // 猶予内に完了したので強制切断は起きない
    assert_eq!(started.elapsed(), Duration::from_secs(1));
    assert_eq!(engine.shutdowns(), 1);
  }

  #[tokio::test]
  async fn engine_released_only_after_listener_stops() {
    /// リスナー停止済みフラグが立っていなければ shutdown を失敗扱いにするエンジン
    struct OrderingEngine {
      listener_stopped: Arc<AtomicBool>,
      ordered: AtomicBool,
    }

    #[async_trait]
    impl EngineHandle for OrderingEngine {
      async fn initialize(&self) -> EngineResult<()> {
        Ok(())
      }

      async fn analyze(&self, _text: &str) -> EngineResult<AnalysisResult> {
        Ok(AnalysisResult::default())
      }

      async fn shutdown(&self) {
        self.ordered.store(self.listener_stopped.load(Ordering::SeqCst), Ordering::SeqCst);
      }
    }

    let listener_stopped = Arc::new(AtomicBool::new(false));
    let engine = Arc::new(OrderingEngine {
      listener_stopped: Arc::clone(&listener_stopped),
      ordered: AtomicBool::new(false),
    });

    let coordinator =
      ShutdownCoordinator::new(SharedState::new(), engine.clone(), Duration::from_secs(5));

    let flag = Arc::clone(&listener_stopped);
    let (tx, rx) = oneshot::channel::<()>();
    let server: JoinHandle<io::Result<()>> = tokio::spawn(async move {
      let _ = rx.await;
      flag.store(true, Ordering::SeqCst);
      Ok(())
    });

    coordinator.run(tx, server).await;

    // エンジン解放時点でリスナーは必ず停止済み
    assert!(engine.ordered.load(Ordering::SeqCst));
  }

  #[tokio::test]
  async fn duplicate_trigger_is_noop() {
    let engine = TrackingEngine::new();
    let state = SharedState::new();
    let coordinator =
      ShutdownCoordinator::new(state.clone(), engine.clone(), Duration::from_secs(5));

    let (tx1, rx1) = oneshot::channel();
    coordinator.run(tx1, drained_server(rx1)).await;

    let (tx2, rx2) = oneshot::channel();
    coordinator.run(tx2, drained_server(rx2)).await;

    // 2 回目はノーオペ。エンジン解放は一度だけ
    assert_eq!(engine.shutdowns(), 1);
  }

  #[test]
  fn begin_returns_true_only_once() {
    let coordinator = ShutdownCoordinator::new(
      SharedState::new(),
      TrackingEngine::new(),
      Duration::from_secs(5),
    );
    assert!(coordinator.begin());
    assert!(!coordinator.begin());
    assert!(!coordinator.begin());
  }
}
