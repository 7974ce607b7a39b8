use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    #[error("Provider error: {message}")]
    ProviderError {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ShellError {
    /// 后端错误（无底层原因）
    pub fn provider(message: impl Into<String>) -> Self {
        ShellError::ProviderError {
            message: message.into(),
            source: None,
        }
    }

    /// 后端错误，附带底层原因
    pub fn provider_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ShellError::ProviderError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ShellError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
