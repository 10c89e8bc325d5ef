use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatuslineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{program}` exited with {status}")]
    Command { program: String, status: String },

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

pub type Result<T, E = StatuslineError> = std::result::Result<T, E>;
