pub mod app_config;
pub mod config;
pub mod identifiers;
pub mod session;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use identifiers::ScannedIdentifiers;
pub use session::{SessionFile, SessionFileError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
