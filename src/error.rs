use thiserror::Error;

pub type Result<T> = std::result::Result<T, StandardsError>;

#[derive(Error, Debug)]
pub enum StandardsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid glob pattern '{pattern}': {message}")]
    Glob { pattern: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl StandardsError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
