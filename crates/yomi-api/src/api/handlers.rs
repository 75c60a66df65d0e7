//! HTTPハンドラー定義

use axum::{
  Json,
  extract::{Query, State},
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use tracing::{debug, error, info};

use crate::errors::ApiError;
use crate::models::{AnalyzeQuery, AnalyzeRequest};

use super::state::AppState;

/// POST /analyze エンドポイント
///
/// 日本語テキストのトークナイズ・ローマ字化・語釈付与を実行する。
/// 入力は JSON ボディかクエリパラメーターのどちらでも渡せる。
///
/// # Request
/// ```json
/// { "text": "解析対象のテキスト" }
/// ```
/// または `POST /analyze?text=解析対象のテキスト`
///
/// # Response
/// - 200 OK: 解析成功
/// - 400 Bad Request: 入力エラー（テキスト欠落・空・長過ぎ）
/// - 503 Service Unavailable: エンジン未準備またはシャットダウン中
/// - 500 Internal Server Error: 解析・エンコード失敗
pub async fn post_analyze(
  State(state): State<AppState>,
  Query(query): Query<AnalyzeQuery>,
  body: Option<Json<AnalyzeRequest>>,
) -> Result<Response, ApiError> {
  // ボディ優先、なければクエリパラメーター。どちらも無い場合は空文字
  // のまま渡し、準備チェックを通過した後の入力検証で拒否させる
  let text = body.map(|Json(request)| request.text).or(query.text).unwrap_or_default();

  debug!(text_len = text.len(), "解析リクエストを受信");

  let response = state.service.analyze(AnalyzeRequest { text }).await?;

  info!(token_count = response.tokenized_parts.len(), "解析完了");

  // エンコード失敗もエラータクソノミーに乗せるため、手動でシリアライズする
  let payload = serde_json::to_string(&response).map_err(|e| {
    error!(error = %e, "レスポンスのエンコードに失敗しました");
    ApiError::EncodingFailed
  })?;

  Ok(([(header::CONTENT_TYPE, "application/json")], payload).into_response())
}

/// ヘルスチェックエンドポイント
///
/// Ready のときのみ 200 を返す。初期化中・初期化失敗・シャット
/// ダウン中は 503 と状態名を返し、運用側の再起動判断に使われる。
pub async fn health_check(State(state): State<AppState>) -> Response {
  if state.gate.is_ready() {
    (StatusCode::OK, "OK").into_response()
  } else {
    (StatusCode::SERVICE_UNAVAILABLE, state.gate.state().as_str()).into_response()
  }
}

/// ルートエンドポイント
///
/// サービスの簡単な案内文を返す。
pub async fn get_index() -> &'static str {
  "yomi-api: Japanese text analysis service. POST /analyze with {\"text\": ...}, GET /health for readiness.\n"
}
