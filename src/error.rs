use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A keyword argument binds a parameter that was already filled positionally.
    #[error("command `{command}` got multiple values for argument `{key}`")]
    DuplicateArgument { command: String, key: String },

    #[error("config io error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid value `{value}` for config option `{option}`")]
    InvalidOption { option: String, value: String },
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
