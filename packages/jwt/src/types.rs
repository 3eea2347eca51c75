//! Token type definitions

use serde_json::{Map, Value};

/// Value of the `typ` header field identifying this token family.
pub const TOKEN_TYPE: &str = "JWT";

/// Segment separator in the compact serialization.
pub const SEPARATOR: u8 = b'.';

/// JOSE header: always `alg` and `typ`, plus caller extensions.
pub type Header = Map<String, Value>;

/// Claim set carried in the payload segment.
pub type Payload = Map<String, Value>;

/// Well-known algorithm identifiers.
pub mod alg {
    /// HMAC using SHA-256
    pub const HS256: &str = "HS256";
    /// HMAC using SHA-384
    pub const HS384: &str = "HS384";
    /// HMAC using SHA-512
    pub const HS512: &str = "HS512";
    /// RSASSA-PKCS1-v1_5 using SHA-256
    pub const RS256: &str = "RS256";
    /// RSASSA-PKCS1-v1_5 using SHA-384
    pub const RS384: &str = "RS384";
    /// RSASSA-PKCS1-v1_5 using SHA-512
    pub const RS512: &str = "RS512";
    /// ECDSA using P-256 and SHA-256
    pub const ES256: &str = "ES256";
    /// ECDSA using P-384 and SHA-384
    pub const ES384: &str = "ES384";

    /// Used by Sign when no algorithm is configured.
    pub const DEFAULT: &str = HS256;
}

/// Header and claims of a token that passed verification.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    /// The decoded header.
    pub header: Header,
    /// The decoded claims.
    pub claims: Payload,
}

impl VerifiedToken {
    /// Get a claim by key.
    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }

    /// Header `alg` as declared by the token.
    pub fn alg(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Convenience accessor for `iss`.
    pub fn iss(&self) -> Option<&str> {
        self.claim("iss").and_then(Value::as_str)
    }

    /// Convenience accessor for `sub`.
    pub fn sub(&self) -> Option<&str> {
        self.claim("sub").and_then(Value::as_str)
    }

    /// Convenience accessor for `aud`.
    pub fn aud(&self) -> Option<&Value> {
        self.claim("aud")
    }

    /// Convenience accessor for `exp`.
    pub fn exp(&self) -> Option<i64> {
        self.claim("exp").and_then(Value::as_i64)
    }

    /// Convenience accessor for `iat`.
    pub fn iat(&self) -> Option<i64> {
        self.claim("iat").and_then(Value::as_i64)
    }

    /// Split into `(header, claims)`.
    pub fn into_parts(self) -> (Header, Payload) {
        (self.header, self.claims)
    }
}
