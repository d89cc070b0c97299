pub mod app;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::{load_config, resolve_config_path, Config};
pub use state::AppState;
