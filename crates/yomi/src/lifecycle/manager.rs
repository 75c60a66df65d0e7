//! ライフサイクルマネージャー
//!
//! コールドスタートのエンジンをバックオフ付きリトライで Ready まで
//! 引き上げる。初期化はリスナーとは独立したタスクで走るため、
//! サーバーは即座に起動して `/health` で進捗を公開できる。

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout};
use tracing::{debug, error, info, warn};

use crate::engine::EngineHandle;
use crate::lifecycle::state::{ReadinessGate, ServiceState, SharedState};

/// リトライ間隔を決めるバックオフポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffPolicy {
  /// 毎回同じ間隔で待つ
  Fixed(Duration),
  /// 試行回数に比例して待つ（attempt × step）
  Linear(Duration),
}

impl BackoffPolicy {
  /// `attempt` 回目（1 始まり）の失敗後に待つ時間
  #[must_use]
  pub fn delay(&self, attempt: u32) -> Duration {
    match self {
      Self::Fixed(step) => *step,
      Self::Linear(step) => *step * attempt,
    }
  }
}

/// 初期化リトライの設定一式
#[derive(Debug, Clone, Copy)]
pub struct InitRetryPolicy {
  /// 最大試行回数
  pub max_attempts: u32,
  /// 失敗後の待ち時間を決めるポリシー
  pub backoff: BackoffPolicy,
  /// 1 試行あたりのタイムアウト
  pub attempt_timeout: Duration,
  /// 初期化全体のタイムアウト（試行・バックオフを合算した上限）
  pub overall_timeout: Duration,
}

impl Default for InitRetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 5,
      backoff: BackoffPolicy::Linear(Duration::from_secs(1)),
      attempt_timeout: Duration::from_secs(30),
      overall_timeout: Duration::from_secs(120),
    }
  }
}

/// エンジン初期化を担うライフサイクルマネージャー
///
/// 状態遷移の唯一の書き手（シャットダウン側を除く）。
/// [`SharedState`] の CAS 遷移によって初期化タスクは高々 1 本に
/// 保たれ、`start` の重複呼び出しは no-op になる。
#[derive(Clone)]
pub struct LifecycleManager {
  state: SharedState,
  engine: Arc<dyn EngineHandle>,
  policy: InitRetryPolicy,
}

impl LifecycleManager {
  /// マネージャーを作成する
  #[must_use]
  pub fn new(state: SharedState, engine: Arc<dyn EngineHandle>, policy: InitRetryPolicy) -> Self {
    Self { state, engine, policy }
  }

  /// リクエスト側へ渡す読み取り専用ゲート
  #[must_use]
  pub fn gate(&self) -> ReadinessGate {
    self.state.gate()
  }

  /// 初期化タスクを起動する
  ///
  /// 返される [`JoinHandle`] は初期化の完了（成否を問わず）で解決
  /// する。すでに初期化が始まっている場合、タスクは即座に終了する
  /// （冪等な start）。
  pub fn start(&self) -> JoinHandle<()> {
    let this = self.clone();
    tokio::spawn(async move { this.run_init().await })
  }

  /// 初期化本体
  async fn run_init(&self) {
    if !self.state.transition(ServiceState::Uninitialized, ServiceState::Initializing) {
      debug!(state = %self.state.load(), "初期化はすでに開始済みのため何もしません");
      return;
    }

    info!(
      max_attempts = self.policy.max_attempts,
      overall_timeout_secs = self.policy.overall_timeout.as_secs(),
      "エンジン初期化を開始します"
    );

    match timeout(self.policy.overall_timeout, self.attempt_loop()).await {
      Ok(true) => {}
      Ok(false) => {
        self.mark_failed("リトライ回数を使い切りました");
      }
      Err(_) => {
        self.mark_failed("初期化全体のタイムアウトを超過しました");
      }
    }
  }

  /// 試行ループ。Ready へ遷移できたら true を返す
  async fn attempt_loop(&self) -> bool {
    for attempt in 1..=self.policy.max_attempts {
      let started = Instant::now();

      let outcome = timeout(self.policy.attempt_timeout, self.engine.initialize()).await;
      let elapsed_ms = started.elapsed().as_millis() as u64;

      match outcome {
        Ok(Ok(())) => {
          if self.state.transition(ServiceState::Initializing, ServiceState::Ready) {
            info!(attempt, elapsed_ms, "エンジンが Ready になりました");
          } else {
            // 初期化中にシャットダウンが始まったケース。Ready は公開しない
            warn!(
              attempt,
              state = %self.state.load(),
              "初期化は成功しましたが状態が変わっているため Ready を公開しません"
            );
          }
          return true;
        }
        Ok(Err(err)) => {
          warn!(attempt, elapsed_ms, error = %err, "初期化試行が失敗しました");
        }
        Err(_) => {
          warn!(
            attempt,
            elapsed_ms,
            timeout_secs = self.policy.attempt_timeout.as_secs(),
            "初期化試行がタイムアウトしました"
          );
        }
      }

      if attempt < self.policy.max_attempts {
        let delay = self.policy.backoff.delay(attempt);
        debug!(attempt, delay_ms = delay.as_millis() as u64, "バックオフ待機します");
        tokio::time::sleep(delay).await;
      }
    }

    false
  }

  /// InitFailed へ遷移して致命ログを出す
  ///
  /// サービング不能の終端状態だがプロセスは落とさない。運用側は
  /// `/health` の 503 を監視して再起動・アラートを行う前提。
  fn mark_failed(&self, reason: &str) {
    if self.state.transition(ServiceState::Initializing, ServiceState::InitFailed) {
      error!(reason, "エンジン初期化に失敗しました。/health は以後 unavailable を返します");
    }
  }
}
