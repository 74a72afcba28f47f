use thiserror::Error;

#[derive(Error, Debug)]
pub enum RucheckError {
    #[error("注册表为空: 至少需要一个检查项")]
    EmptyRegistry,

    #[error("重复的检查 ID: {0}")]
    DuplicateTestId(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("TOML 解析错误: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for RucheckError {
    fn from(err: anyhow::Error) -> Self {
        RucheckError::Other(err.to_string())
    }
}

/// Result type for rucheck crate
pub type Result<T> = std::result::Result<T, RucheckError>;
