pub mod app_config;
pub mod config;
pub mod row;

use thiserror::Error;

pub use app_config::ImportConfig;
pub use config::{load_import_config, load_import_config_from_env};
pub use row::{ColumnIndex, ProductRow, IMAGE_SRC, REQUIRED_COLUMNS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing env vars: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing required columns in file: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
