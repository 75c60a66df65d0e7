//! API設定の定数定義

/// 入力テキストの最大長（バイト単位）
///
/// エンジン呼び出し 1 回に渡すテキストの上限。
/// 大きなテキストの処理によるリソース枯渇を防ぐための制限。
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// デフォルトのリッスンポート
pub const DEFAULT_PORT: u16 = 8080;

/// デフォルトのエンジンコマンド
///
/// PATH 上の ichiran-cli をそのまま使う。コンテナ内のエンジンを
/// 叩く場合は `docker exec <container> ichiran-cli` 等を指定する。
pub const DEFAULT_ENGINE_COMMAND: &str = "ichiran-cli";

/// 解析リクエスト 1 件あたりのデフォルトデッドライン（秒）
pub const DEFAULT_ANALYZE_TIMEOUT_SECS: u64 = 30;

/// シャットダウン時に処理中リクエストへ与える猶予（秒）
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 10;

/// 選択的翻字で「残す」漢字の頻度上位数
pub const DEFAULT_TRANSLIT_KANJI_LIMIT: usize = 1000;

/// 初期化の最大試行回数
pub const DEFAULT_INIT_MAX_ATTEMPTS: u32 = 5;

/// 初期化 1 試行あたりのタイムアウト（秒）
pub const DEFAULT_INIT_ATTEMPT_TIMEOUT_SECS: u64 = 30;

/// 初期化全体のタイムアウト（秒）
pub const DEFAULT_INIT_TIMEOUT_SECS: u64 = 120;

/// 初期化リトライの線形バックオフの刻み（秒）
pub const DEFAULT_INIT_BACKOFF_STEP_SECS: u64 = 1;
