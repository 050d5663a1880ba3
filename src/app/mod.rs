//! Application Layer
//!
//! User-facing CLI, configuration management, and shared app state.

pub mod cli;
pub mod config;
pub mod state;

pub use cli::Cli;
pub use config::Config;
pub use state::AppState;
