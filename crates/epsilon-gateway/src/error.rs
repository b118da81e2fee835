use thiserror::Error;

/// Errors returned by gateway operations.
///
/// A declined card is not an error: Epsilon reports it inside a 200 reply,
/// which parses into a [`crate::Response`] with `success() == false`.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway answered with a non-2xx status. The body is kept verbatim
    /// and never parsed.
    #[error("response error: HTTP {status}")]
    ResponseError { status: u16, body: String },

    #[error("http error: {0}")]
    Http(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// HTTP status carried by a [`GatewayError::ResponseError`].
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::ResponseError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
