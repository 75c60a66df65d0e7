//! yomi 日本語テキスト解析ライブラリー
//!
//! 外部の ichiran エンジンを用いた日本語テキストのトークナイズ・
//! ローマ字化・語釈付与を行う。エンジンの起動は遅く失敗し得るため、
//! 初期化リトライと準備状態の公開を行うライフサイクル管理を含む。

/// エンジンモジュール - EngineHandle トレイトと ichiran-cli クライアントを定義
pub mod engine;

/// エラーモジュール - EngineError 等のエラー型を定義
pub mod errors;

/// ライフサイクルモジュール - ServiceState, ReadinessGate, LifecycleManager を定義
pub mod lifecycle;

/// データモデルモジュール - AnalysisResult, AnalysisToken 等のデータ構造を定義
pub mod models;

/// 選択的翻字モジュール - 頻度ランクに基づく漢字の選択的かな置換
pub mod translit;

/// 再エクスポート
pub use engine::{EngineHandle, IchiranCliEngine};
pub use errors::{EngineError, EngineResult};
pub use lifecycle::{
  BackoffPolicy, InitRetryPolicy, LifecycleManager, ReadinessGate, ServiceState, SharedState,
};
pub use models::{AnalysisResult, AnalysisToken, Gloss};
