//! エラー定義

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// エンジン関連のエラー
///
/// ichiran-cli の呼び出し・出力解析・初期化で発生するエラーを定義する。
/// 本クレートの外部に公開するエンジン API はこのエラーを返すこと。
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum EngineError {
  /// エンジンプロセスの起動に失敗
  #[error("エンジンプロセスの起動に失敗しました: {0}")]
  Spawn(#[source] Arc<io::Error>),

  /// エンジンプロセスが異常終了
  #[error("エンジンプロセスが異常終了しました: status={status}, stderr={stderr}")]
  Process {
    /// 終了ステータス（取得できない場合は -1）
    status: i32,
    /// 標準エラー出力（先頭部分のみ）
    stderr: String,
  },

  /// エンジン出力の解析に失敗
  #[error("エンジン出力の解析に失敗しました: {reason}")]
  Parse {
    /// 解析失敗の理由
    reason: String,
  },

  /// エンジン呼び出しがデッドラインを超過
  #[error("エンジン呼び出しがデッドラインを超過しました")]
  Timeout,

  /// エンジン初期化に失敗
  #[error("エンジン初期化に失敗しました: {0}")]
  Init(String),
}

impl EngineError {
  /// 出力解析エラーを作成
  #[must_use]
  pub fn parse(reason: impl Into<String>) -> Self {
    Self::Parse { reason: reason.into() }
  }

  /// 初期化エラーを作成
  #[must_use]
  pub fn init(message: impl Into<String>) -> Self {
    Self::Init(message.into())
  }
}

impl From<io::Error> for EngineError {
  fn from(err: io::Error) -> Self {
    Self::Spawn(Arc::new(err))
  }
}

impl From<serde_json::Error> for EngineError {
  fn from(err: serde_json::Error) -> Self {
    Self::Parse { reason: err.to_string() }
  }
}

/// yomi クレートの標準 Result 型エイリアス
pub type EngineResult<T> = Result<T, EngineError>;
