use thiserror::Error;

/// Coarse classification of [`AnalysisError`] used by callers that only care
/// about where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Provider,
    MalformedResponse,
    InvalidInput,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Provider blocked the request: {reason}")]
    Blocked { reason: String },

    #[error("Provider returned no generated text")]
    EmptyResponse,

    #[error("Response does not match the analysis schema: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Invalid field `{field}` in response: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Empty {what}")]
    EmptyInput { what: &'static str },
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::MissingApiKey { .. } => ErrorKind::Configuration,
            AnalysisError::Http(_)
            | AnalysisError::Provider { .. }
            | AnalysisError::Blocked { .. }
            | AnalysisError::EmptyResponse => ErrorKind::Provider,
            AnalysisError::MalformedResponse(_) | AnalysisError::InvalidField { .. } => {
                ErrorKind::MalformedResponse
            }
            AnalysisError::EmptyInput { .. } => ErrorKind::InvalidInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
