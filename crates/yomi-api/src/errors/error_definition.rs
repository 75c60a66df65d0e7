//! APIエラー定義

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

// yomi クレートのエラー型をインポート
use yomi::errors::EngineError;

/// エラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
  /// エンジンが未初期化、またはシャットダウン中
  NotReady,
  /// 入力値が無効
  InvalidInput,
  /// テキストが長すぎる
  TextTooLong,
  /// 解析失敗（デッドライン超過を含む）
  AnalysisFailed,
  /// レスポンスのエンコード失敗
  EncodingFailed,
  /// 設定エラー
  Config,
}

impl ApiErrorKind {
  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::NotReady => "not_ready",
      Self::InvalidInput => "invalid_input",
      Self::TextTooLong => "text_too_long",
      Self::AnalysisFailed => "analysis_failed",
      Self::EncodingFailed => "encoding_failed",
      Self::Config => "config_error",
    }
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::NotReady => StatusCode::SERVICE_UNAVAILABLE,
      Self::InvalidInput | Self::TextTooLong => StatusCode::BAD_REQUEST,
      Self::AnalysisFailed | Self::EncodingFailed | Self::Config => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

/// APIエラー
///
/// エンジン由来のエラーはディスパッチャー境界ですべてこの型に
/// 写像される。内部の生のエラーがレスポンスボディへ漏れることはない。
#[derive(Debug, Error)]
pub enum ApiError {
  /// エンジンが未初期化、またはシャットダウン中
  #[error("サービスはまだリクエストを受け付けられません")]
  NotReady,

  /// 入力値が無効
  #[error("入力値が無効です: {0}")]
  InvalidInput(String),

  /// テキストが長すぎる
  #[error("テキストが長すぎます: {0} バイト（最大: {1} バイト）")]
  TextTooLong(usize, usize),

  /// 解析失敗。原因はログにのみ残し、クライアントへは出さない
  #[error("解析に失敗しました")]
  AnalysisFailed,

  /// レスポンスのエンコード失敗
  #[error("レスポンスのエンコードに失敗しました")]
  EncodingFailed,

  /// 設定エラー
  #[error("設定エラー: {0}")]
  Config(String),
}

impl ApiError {
  /// エラーの種類を取得
  #[must_use]
  pub fn kind(&self) -> ApiErrorKind {
    match self {
      Self::NotReady => ApiErrorKind::NotReady,
      Self::InvalidInput(_) => ApiErrorKind::InvalidInput,
      Self::TextTooLong(_, _) => ApiErrorKind::TextTooLong,
      Self::AnalysisFailed => ApiErrorKind::AnalysisFailed,
      Self::EncodingFailed => ApiErrorKind::EncodingFailed,
      Self::Config(_) => ApiErrorKind::Config,
    }
  }

  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    self.kind().status()
  }

  /// 無効な入力エラーを作成
  #[must_use]
  pub fn invalid_input(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  /// テキスト長超過エラーを作成
  #[must_use]
  pub fn text_too_long(actual: usize, max: usize) -> Self {
    Self::TextTooLong(actual, max)
  }

  /// 設定エラーを作成
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }
}

/// エラーレスポンスのJSON構造
#[derive(Serialize)]
struct ErrorResponse {
  error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
  code: &'static str,
  message: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = ErrorResponse {
      error: ErrorBody {
        code: self.code(),
        message: self.to_string(),
      },
    };

    (status, Json(body)).into_response()
  }
}

/// EngineError から ApiError への変換
///
/// エンジン層のエラーはすべて解析失敗として扱う。原因の詳細は
/// 変換前に呼び出し側でログに残すこと。
impl From<EngineError> for ApiError {
  fn from(_err: EngineError) -> Self {
    ApiError::AnalysisFailed
  }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, ApiError>;
