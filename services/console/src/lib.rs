pub mod adapters;
pub mod config;
pub mod error;
pub mod ui;

// Re-export the pieces the binary wires together.
pub use adapters::http::HttpBackend;
pub use config::Config;
pub use error::AppError;
