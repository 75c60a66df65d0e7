//! engine module
pub mod handle;
pub mod ichiran_cli;

/// Re-export engine types
pub use handle::EngineHandle;
pub use ichiran_cli::IchiranCliEngine;
