//! Token assembly
//!
//! Header and claims are built, encoded, signed and joined in one pass.
//! Nothing is returned unless every step succeeded.

use super::{
    algorithms::{Registry, utils::base64_url_encode},
    claims::{build_claims, build_header, payload_from_value},
    keys::Key,
    options::SignOption,
};
use crate::{
    error::{JwtError, JwtResult},
    types::SEPARATOR,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Sign `claims` with the global registry at the current time.
///
/// `claims` must serialize to a non-empty JSON object. `opt = None` means
/// all defaults (HS256, no lifetime, no standard claims beyond `iat`).
///
/// # Errors
/// `EmptyClaims`, `EmptyKey`, `InvalidClaims`, `UnsupportedAlgorithm`,
/// `InvalidKeyMaterial` or `Serialization`.
pub fn sign<C>(claims: &C, key: &Key, opt: Option<&SignOption>) -> JwtResult<Vec<u8>>
where
    C: Serialize + ?Sized,
{
    Registry::global().sign(claims, key, opt)
}

impl Registry {
    /// Sign with this registry at the current time.
    ///
    /// # Errors
    /// See [`sign`].
    pub fn sign<C>(&self, claims: &C, key: &Key, opt: Option<&SignOption>) -> JwtResult<Vec<u8>>
    where
        C: Serialize + ?Sized,
    {
        self.sign_at(claims, key, opt, chrono::Utc::now().timestamp())
    }

    /// Sign with an explicit `iat`. Identical inputs give identical tokens
    /// for the deterministic algorithm families.
    ///
    /// # Errors
    /// See [`sign`].
    pub fn sign_at<C>(
        &self,
        claims: &C,
        key: &Key,
        opt: Option<&SignOption>,
        issued_at: i64,
    ) -> JwtResult<Vec<u8>>
    where
        C: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(claims)
            .map_err(|e| JwtError::Serialization(e.to_string()))
            .and_then(payload_from_value)?;
        if key.is_empty() {
            return Err(JwtError::EmptyKey);
        }

        let default_opt = SignOption::default();
        let opt = opt.unwrap_or(&default_opt);
        let algorithm_name = opt.algorithm_or_default();

        let header = build_header(algorithm_name, opt.header.as_ref());
        let header_segment = encode_segment(&header)?;

        let claims = build_claims(payload, opt, issued_at);
        let claims_segment = encode_segment(&claims)?;

        let algorithm = self.get(algorithm_name)?;

        let mut token = Vec::with_capacity(header_segment.len() + claims_segment.len() + 1);
        token.extend_from_slice(header_segment.as_bytes());
        token.push(SEPARATOR);
        token.extend_from_slice(claims_segment.as_bytes());

        let signature = algorithm.sign(&token, key)?;
        token.push(SEPARATOR);
        token.extend_from_slice(base64_url_encode(&signature).as_bytes());

        tracing::debug!(alg = algorithm_name, len = token.len(), "token signed");
        Ok(token)
    }
}

fn encode_segment(map: &Map<String, Value>) -> JwtResult<String> {
    let json = serde_json::to_vec(map).map_err(|e| JwtError::Serialization(e.to_string()))?;
    Ok(base64_url_encode(&json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::algorithms::utils::split_token, types::alg};
    use serde_json::json;

    #[test]
    fn produces_three_segments() {
        let token = sign(&json!({"a": 1}), &Key::secret("k"), None).unwrap();
        let parts = split_token(&token).unwrap();
        assert!(!parts.header.is_empty());
        assert!(!parts.payload.is_empty());
        assert!(!parts.signature.is_empty());
    }

    #[test]
    fn empty_claims_are_checked_before_the_key() {
        let empty = Key::secret("");
        assert_eq!(sign(&json!({}), &empty, None), Err(JwtError::EmptyClaims));
        assert_eq!(sign(&Value::Null, &empty, None), Err(JwtError::EmptyClaims));
        assert_eq!(sign(&json!({"a": 1}), &empty, None), Err(JwtError::EmptyKey));
    }

    #[test]
    fn none_claims_are_empty() {
        let claims: Option<Map<String, Value>> = None;
        assert_eq!(
            sign(&claims, &Key::secret("k"), None),
            Err(JwtError::EmptyClaims)
        );
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let opt = SignOption::new().with_algorithm("none");
        assert_eq!(
            sign(&json!({"a": 1}), &Key::secret("k"), Some(&opt)),
            Err(JwtError::UnsupportedAlgorithm("none".to_string()))
        );
    }

    #[test]
    fn fixed_timestamp_is_deterministic() {
        let registry = Registry::global();
        let opt = SignOption::new().with_algorithm(alg::HS384);
        let key = Key::secret("k");
        let first = registry.sign_at(&json!({"a": 1}), &key, Some(&opt), 42).unwrap();
        let second = registry.sign_at(&json!({"a": 1}), &key, Some(&opt), 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_registry_supports_nothing() {
        assert_eq!(
            Registry::empty().sign(&json!({"a": 1}), &Key::secret("k"), None),
            Err(JwtError::UnsupportedAlgorithm(alg::HS256.to_string()))
        );
    }
}
