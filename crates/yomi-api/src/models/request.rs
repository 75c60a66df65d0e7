//! リクエストモデル定義

use serde::Deserialize;

/// 解析リクエスト
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
  /// 解析対象のテキスト
  pub text: String,
}

/// クエリパラメーター版の解析リクエスト
///
/// `POST /analyze?text=...` の形式。JSON ボディと併用された場合は
/// ボディが優先される。
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
  /// 解析対象のテキスト
  pub text: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialize_valid_request() {
    let json = r#"{"text": "本を読む"}"#;
    let req: AnalyzeRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.text, "本を読む");
  }

  #[test]
  fn deserialize_empty_text() {
    let json = r#"{"text": ""}"#;
    let req: AnalyzeRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.text, "");
  }

  #[test]
  fn query_without_text_is_none() {
    let query: AnalyzeQuery = serde_json::from_str("{}").unwrap();
    assert!(query.text.is_none());
  }
}
