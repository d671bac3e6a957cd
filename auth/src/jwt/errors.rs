use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

/// Opaque outcome of a failed token validation.
///
/// Malformed tokens, signature mismatches and expired tokens all collapse into
/// this single value so callers cannot tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid or expired token")]
pub struct InvalidToken;

impl From<JwtError> for InvalidToken {
    fn from(_: JwtError) -> Self {
        InvalidToken
    }
}
