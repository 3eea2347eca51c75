//! Token parsing and verification
//!
//! Split, decode, header check, algorithm resolution, signature, claim
//! policy. The first failing step ends verification.

use super::{
    algorithms::{
        Registry,
        utils::{decode_object, split_token},
    },
    claims::ClaimsValidator,
    keys::Key,
    options::VerifyOption,
};
use crate::{
    error::{JwtError, JwtResult},
    types::{TOKEN_TYPE, VerifiedToken},
};
use serde_json::Value;

/// Verify `token` with the global registry at the current time.
///
/// The verifier is chosen by `opt.algorithm`; the token's own `alg` header
/// is never used for dispatch.
///
/// # Errors
/// `MalformedToken`, `InvalidHeaderType`, `UnsupportedAlgorithm`, `EmptyKey`,
/// `InvalidKeyMaterial` (key kind does not fit the algorithm),
/// `InvalidSignature`, or a claim policy violation.
pub fn verify(token: impl AsRef<[u8]>, key: &Key, opt: &VerifyOption) -> JwtResult<VerifiedToken> {
    Registry::global().verify(token, key, opt)
}

impl Registry {
    /// Verify with this registry at the current time.
    ///
    /// # Errors
    /// See [`verify`].
    pub fn verify(
        &self,
        token: impl AsRef<[u8]>,
        key: &Key,
        opt: &VerifyOption,
    ) -> JwtResult<VerifiedToken> {
        self.verify_at(token, key, opt, chrono::Utc::now().timestamp())
    }

    /// Verify with `now` as the current epoch second.
    ///
    /// # Errors
    /// See [`verify`].
    pub fn verify_at(
        &self,
        token: impl AsRef<[u8]>,
        key: &Key,
        opt: &VerifyOption,
        now: i64,
    ) -> JwtResult<VerifiedToken> {
        let token = token.as_ref();

        let parts = split_token(token)?;
        let header = decode_object(parts.header, "header")?;
        let claims = decode_object(parts.payload, "payload")?;

        match header.get("typ") {
            Some(Value::String(typ)) if typ == TOKEN_TYPE => {}
            _ => return Err(JwtError::InvalidHeaderType),
        }

        let algorithm = self.get(&opt.algorithm)?;
        if key.is_empty() {
            return Err(JwtError::EmptyKey);
        }

        match algorithm.verify(token, key) {
            Ok(()) => {}
            Err(err @ JwtError::InvalidKeyMaterial(_)) => {
                tracing::debug!(alg = algorithm.name(), %err, "key does not fit algorithm");
                return Err(err);
            }
            Err(cause) => {
                tracing::debug!(alg = algorithm.name(), %cause, "signature rejected");
                return Err(JwtError::InvalidSignature);
            }
        }

        if let Err(violation) = ClaimsValidator::new(opt, now).validate(&claims) {
            tracing::debug!(alg = algorithm.name(), %violation, "claim policy rejected token");
            return Err(violation);
        }

        tracing::debug!(alg = algorithm.name(), "token verified");
        Ok(VerifiedToken { header, claims })
    }
}
