use dreams_core::error::CoreError;

/// Errors from the API client, session handling and controllers.
///
/// 4xx and 5xx responses are not distinguished: both surface as
/// [`ClientError::Api`] and neither is retried.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No token is stored; no request was sent.
    #[error("Not authenticated: no token available")]
    NotAuthenticated,

    /// The HTTP request itself failed (network, DNS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A domain-level error from `dreams_core`, including drafts that fail
    /// their required-field markers (nothing is sent in that case).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// `submit` was called while no form was open.
    #[error("No form is open")]
    NoOpenForm,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token store error: {0}")]
    TokenStore(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status for [`ClientError::Api`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
