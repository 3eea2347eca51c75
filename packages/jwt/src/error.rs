//! Token error types

use thiserror::Error;

/// Token operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Every failure the sign and verify pipelines can report.
///
/// Each failure maps to exactly one variant so callers can tell an expired
/// token apart from a forged one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Sign was called without claims (null or an empty object)
    #[error("Empty claims: a token needs at least one claim")]
    EmptyClaims,

    /// No key, or an empty secret, was supplied
    #[error("Empty key: a secret or private key is required")]
    EmptyKey,

    /// The algorithm identifier is not registered
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Wrong segment count or undecodable base64/JSON
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Header `typ` is missing or is not `JWT`
    #[error("Invalid header type")]
    InvalidHeaderType,

    /// The cryptographic check failed
    #[error("Invalid signature")]
    InvalidSignature,

    /// `exp` lies in the past beyond the clock tolerance
    #[error("Token has expired")]
    TokenExpired,

    /// `nbf` lies in the future beyond the clock tolerance
    #[error("Token not yet valid")]
    TokenNotYetValid,

    /// `aud` does not match the expected audience
    #[error("Audience mismatch")]
    AudienceMismatch,

    /// `sub` does not match the expected subject
    #[error("Subject mismatch")]
    SubjectMismatch,

    /// `iss` does not match the expected issuer
    #[error("Issuer mismatch")]
    IssuerMismatch,

    /// Key kind does not fit the algorithm, or key bytes failed to parse
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Claims are not a flat key-value mapping, or a registered claim has the wrong type
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    /// JSON encoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Verification was requested without naming the expected algorithm
    #[error("Missing algorithm: verification needs an expected algorithm")]
    MissingAlgorithm,

    /// Background task was dropped before producing a result, or no runtime
    /// was available to run it
    #[error("Background task failed")]
    TaskFailed,
}

impl JwtError {
    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        JwtError::MalformedToken(msg.to_string())
    }

    /// Create an invalid key material error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwtError::InvalidKeyMaterial(msg.to_string())
    }

    /// Create an invalid claims error
    #[inline]
    #[must_use]
    pub fn invalid_claims(msg: &str) -> Self {
        JwtError::InvalidClaims(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// True when the token was authentic but its claims were rejected.
    ///
    /// Useful for auth-retry logic: a claim violation can be fixed by
    /// fetching a fresh token, a forgery cannot.
    #[must_use]
    pub fn is_claim_violation(&self) -> bool {
        matches!(
            self,
            JwtError::TokenExpired
                | JwtError::TokenNotYetValid
                | JwtError::AudienceMismatch
                | JwtError::SubjectMismatch
                | JwtError::IssuerMismatch
        )
    }

    /// True when the token bytes themselves cannot be trusted.
    #[must_use]
    pub fn is_forgery(&self) -> bool {
        matches!(
            self,
            JwtError::InvalidSignature | JwtError::MalformedToken(_) | JwtError::InvalidHeaderType
        )
    }
}
