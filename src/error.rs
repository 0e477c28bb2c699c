use thiserror::Error;

#[derive(Debug, Error)]
pub enum TspError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no points to route")]
    EmptyInput,
    #[error("malformed input on line {line}: {reason} (token `{token}`)")]
    MalformedInput {
        line: usize,
        token: String,
        reason: String,
    },
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn malformed(line: usize, token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }
}
