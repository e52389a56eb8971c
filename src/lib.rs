pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod routes;
pub mod state;

// Re-export AppState for convenience
pub use state::AppState;
