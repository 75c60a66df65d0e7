//! lifecycle module
pub mod manager;
pub mod state;

/// Re-export lifecycle types
pub use manager::{BackoffPolicy, InitRetryPolicy, LifecycleManager};
pub use state::{ReadinessGate, ServiceState, SharedState};
