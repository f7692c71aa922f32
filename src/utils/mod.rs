pub mod errors;
pub mod config;

pub use errors::{ApiError, StoreError};
pub use config::{AppConfig, ConfigError};
