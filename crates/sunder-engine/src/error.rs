//! Compilation errors

use thiserror::Error;

pub type SunderResult<T> = Result<T, SunderError>;

#[derive(Debug, Error)]
pub enum SunderError {
    #[error("Invalid class name: '{name}'")]
    InvalidClassName { name: String },

    #[error("Invalid member name in class {class}: '{name}'")]
    InvalidMemberName { class: String, name: String },

    #[error("Duplicate method {class}.{method}")]
    DuplicateMethod { class: String, method: String },

    #[error("Duplicate parameter '{param}' in {class}.{method}")]
    DuplicateParameter {
        class: String,
        method: String,
        param: String,
    },

    #[error("Parameter '{param}' in {class}.{method} shadows a global the RPC stub needs")]
    ReservedParameter {
        class: String,
        method: String,
        param: String,
    },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse class models: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to render deployment descriptor: {0}")]
    TomlRender(#[from] toml::ser::Error),
}
