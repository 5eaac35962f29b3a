//! Error types for polyflow_launch

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("JSON error in '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing environment variable '{0}'. Was the node started by polyflow_launch?")]
    MissingEnvironment(String),

    #[error("Environment variable '{0}' is not valid UTF-8")]
    NonUtf8Environment(String),

    #[error("Invalid node name '{0}': must be a single path component")]
    InvalidNodeName(String),

    #[error("Unsupported config format for {path} (expected .yaml, .yml or .json)")]
    UnsupportedConfigFormat { path: String },

    #[error("Failed to spawn '{executable}': {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LaunchError {
    pub(crate) fn json(key: impl Into<String>, source: serde_json::Error) -> Self {
        LaunchError::Json {
            key: key.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;
