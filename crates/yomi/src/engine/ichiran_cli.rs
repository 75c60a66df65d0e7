//! ichiran-cli エンジンクライアント
//!
//! 解析のたびに `ichiran-cli -f <text>` を起動し、標準出力の JSON を
//! デコードする。呼び出しごとにプロセスを張るため、エンジン側の
//! 並行性制御は ichiran 自身（と背後のデータベース）に委ねられる。

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::engine::handle::EngineHandle;
use crate::errors::{EngineError, EngineResult};
use crate::models::AnalysisResult;

/// 初期化プローブに使う入力
///
/// コールドスタート直後の ichiran は最初のクエリでデータベースの
/// ウォームアップを行うため、軽い一語を投げて完走を確認する。
const INIT_PROBE_TEXT: &str = "本";

/// stderr をエラーに載せる際の上限バイト数
const STDERR_SNIPPET_MAX: usize = 512;

/// ichiran-cli ベースのエンジンハンドル
///
/// `command` は空白区切りのコマンドライン先頭部で、
/// `ichiran-cli` 単体でも `docker exec ichiran-main-1 ichiran-cli` の
/// ようなラッパー経由でも指定できる。
#[derive(Debug, Clone)]
pub struct IchiranCliEngine {
  /// 実行するプログラムと前置引数
  command: Vec<String>,
}

impl IchiranCliEngine {
  /// エンジンハンドルを作成する
  ///
  /// # Errors
  /// `command_line` が空白のみの場合にエラーを返す。
  pub fn new(command_line: &str) -> EngineResult<Self> {
    let command: Vec<String> = command_line.split_whitespace().map(str::to_string).collect();
    if command.is_empty() {
      return Err(EngineError::init("エンジンコマンドが空です"));
    }
    Ok(Self { command })
  }

  /// `<command> -f <text>` を実行して標準出力を返す
  async fn run_cli(&self, text: &str) -> EngineResult<String> {
    let mut cmd = Command::new(&self.command[0]);
    cmd.args(&self.command[1..]).arg("-f").arg(text).kill_on_drop(true);

    debug!(program = %self.command[0], "エンジンプロセスを起動します");

    let output = cmd.output().await?;

    if !output.status.success() {
      let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
      stderr.truncate(STDERR_SNIPPET_MAX);
      return Err(EngineError::Process {
        status: output.status.code().unwrap_or(-1),
        stderr,
      });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }
}

#[async_trait]
impl EngineHandle for IchiranCliEngine {
  async fn initialize(&self) -> EngineResult<()> {
    // プローブ解析が完走すればエンジンは準備完了とみなす
    let raw = self.run_cli(INIT_PROBE_TEXT).await.map_err(|e| {
      warn!(error = %e, "初期化プローブに失敗しました");
      EngineError::init(e.to_string())
    })?;

    AnalysisResult::from_ichiran_json(&raw)
      .map_err(|e| EngineError::init(format!("プローブ出力の解析に失敗: {e}")))?;

    info!("エンジン初期化プローブが完走しました");
    Ok(())
  }

  async fn analyze(&self, text: &str) -> EngineResult<AnalysisResult> {
    let raw = self.run_cli(text).await?;
    AnalysisResult::from_ichiran_json(&raw)
  }

  async fn shutdown(&self) {
    // プロセスは呼び出しごとに終了しているため、解放すべき常駐資源はない
    info!("エンジンハンドルを解放しました");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_splits_command_line() {
    let engine = IchiranCliEngine::new("docker exec ichiran-main-1 ichiran-cli").unwrap();
    assert_eq!(engine.command.len(), 4);
    assert_eq!(engine.command[0], "docker");
  }

  #[test]
  fn new_rejects_empty_command() {
    assert!(IchiranCliEngine::new("   ").is_err());
  }

  // ichiran-cli が必要なテストは with_engine_tests フィーチャーでオプトイン
  #[tokio::test]
  #[cfg_attr(not(feature = "with_engine_tests"), ignore)]
  async fn analyze_against_real_engine() {
    let engine = IchiranCliEngine::new("ichiran-cli").unwrap();
    engine.initialize().await.expect("engine must initialize: check local ichiran setup");

    let result = engine.analyze("本を読む").await.expect("analysis should succeed");
    assert!(!result.tokens.is_empty());
  }
}
