//! Header and claim construction for the sign pipeline
//!
//! Both maps start from the values this crate controls and then take caller
//! fields only where the key is still free. Reserved and configured keys
//! always win.

use crate::{
    api::options::SignOption,
    error::{JwtError, JwtResult},
    types::{Header, Payload, TOKEN_TYPE},
};
use serde_json::{Map, Value};

/// Copy every entry of `extra` whose key is not already in `target`.
fn insert_if_absent(target: &mut Map<String, Value>, extra: impl IntoIterator<Item = (String, Value)>) {
    for (key, value) in extra {
        if !target.contains_key(&key) {
            target.insert(key, value);
        }
    }
}

/// `{alg, typ: "JWT"}` plus any extension fields that do not collide.
pub fn build_header(algorithm: &str, extension: Option<&Header>) -> Header {
    let mut header = Header::new();
    header.insert("alg".to_string(), Value::from(algorithm));
    header.insert("typ".to_string(), Value::from(TOKEN_TYPE));

    if let Some(extension) = extension {
        insert_if_absent(
            &mut header,
            extension.iter().map(|(k, v)| (k.clone(), v.clone())),
        );
    }

    header
}

/// Turn a serialized caller payload into a claim map.
///
/// # Errors
/// `EmptyClaims` for `null` or `{}`, `InvalidClaims` for anything that is not
/// a JSON object.
pub fn payload_from_value(payload: Value) -> JwtResult<Payload> {
    match payload {
        Value::Null => Err(JwtError::EmptyClaims),
        Value::Object(map) if map.is_empty() => Err(JwtError::EmptyClaims),
        Value::Object(map) => Ok(map),
        other => Err(JwtError::InvalidClaims(format!(
            "claims must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// `{iat}` plus configured `iss`/`exp`/`nbf`/`sub`/`aud`, then the caller
/// payload for keys still free.
pub fn build_claims(payload: Payload, opt: &SignOption, issued_at: i64) -> Payload {
    let mut claims = Payload::new();
    claims.insert("iat".to_string(), Value::from(issued_at));

    if let Some(issuer) = &opt.issuer {
        claims.insert("iss".to_string(), Value::from(issuer.as_str()));
    }
    if let Some(exp) = offset(issued_at, opt.expires_in) {
        claims.insert("exp".to_string(), Value::from(exp));
    }
    if let Some(nbf) = offset(issued_at, opt.not_before) {
        claims.insert("nbf".to_string(), Value::from(nbf));
    }
    if let Some(subject) = &opt.subject {
        claims.insert("sub".to_string(), Value::from(subject.as_str()));
    }
    if let Some(audience) = &opt.audience {
        claims.insert("aud".to_string(), Value::from(audience.as_str()));
    }

    insert_if_absent(&mut claims, payload);
    claims
}

/// Absolute epoch seconds for a relative duration; zero counts as unset.
fn offset(issued_at: i64, duration: Option<chrono::Duration>) -> Option<i64> {
    duration
        .filter(|d| !d.is_zero())
        .map(|d| issued_at.saturating_add(d.num_seconds()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
