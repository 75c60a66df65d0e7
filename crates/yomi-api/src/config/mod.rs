//! Config module

mod constants;
mod env;

pub use constants::{
  DEFAULT_ANALYZE_TIMEOUT_SECS, DEFAULT_ENGINE_COMMAND, DEFAULT_PORT, DEFAULT_SHUTDOWN_GRACE_SECS,
  DEFAULT_TRANSLIT_KANJI_LIMIT, MAX_TEXT_LENGTH,
};
pub use env::Config;
