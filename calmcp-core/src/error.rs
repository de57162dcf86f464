use thiserror::Error;

pub type Result<T, E = ToolError> = std::result::Result<T, E>;

/// Failures talking to the calendar provider, including acquiring credentials.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to acquire calendar credentials: {0}")]
    Credentials(String),

    #[error("calendar API error: {0}")]
    Api(String),

    #[error("calendar API response is missing `{0}`")]
    MissingField(&'static str),
}

/// Every way a tool invocation can fail short of a panic.
#[derive(Debug, Error)]
pub enum ToolError {
    // ------------------- Validation -------------------
    #[error("No arguments provided")]
    MissingArguments,

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },

    // ------------------- Operation -------------------
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Coarse classification used for logging and by callers that care whether
/// the caller or the provider is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Operation,
}

impl ToolError {
    pub fn invalid(tool: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            | Self::MissingArguments | Self::UnknownTool { .. } | Self::InvalidArguments { .. } => {
                ErrorKind::Validation
            },
            | Self::Provider(_) => ErrorKind::Operation,
        }
    }
}
