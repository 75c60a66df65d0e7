//! api module
pub mod handlers;
pub mod routes;
pub mod state;

/// Re-export API types
pub use handlers::{get_index, health_check, post_analyze};
pub use routes::{create_router, run_server};
pub use state::AppState;
