/// Failure taxonomy shared by every adapter. The HTTP boundary decides which
/// status each variant maps to, since the mapping differs per endpoint.
#[derive(Debug, thiserror::Error)]
pub enum GourmetError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl GourmetError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Configuration(_) => "configuration",
            Self::Upstream { .. } => "upstream",
            Self::Unexpected(_) => "unexpected",
        }
    }
}
