//! Segment helpers shared by the algorithm implementations and the pipelines
//!
//! Base64 is URL-safe without padding (RFC 7515). Decoding rejects
//! non-canonical trailing bits, so every accepted segment has exactly one
//! textual form.

use crate::error::{JwtError, JwtResult};
use crate::types::SEPARATOR;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::{Map, Value};

/// Base64 URL-safe encoding without padding
#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding
#[inline]
pub(crate) fn base64_url_decode(input: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Borrowed view of the three segments of a compact token.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenParts<'a> {
    pub header: &'a [u8],
    pub payload: &'a [u8],
    pub signature: &'a [u8],
    /// `header "." payload`, exactly as it appears in the token
    pub signing_input: &'a [u8],
}

/// Split a token into exactly three separator-delimited segments.
pub(crate) fn split_token(token: &[u8]) -> JwtResult<TokenParts<'_>> {
    let mut separators = token
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == SEPARATOR)
        .map(|(i, _)| i);

    let (first, second) = match (separators.next(), separators.next(), separators.next()) {
        (Some(first), Some(second), None) => (first, second),
        _ => return Err(JwtError::malformed("token must have exactly three segments")),
    };

    Ok(TokenParts {
        header: &token[..first],
        payload: &token[first + 1..second],
        signature: &token[second + 1..],
        signing_input: &token[..second],
    })
}

/// Decode one base64 segment into a JSON object.
pub(crate) fn decode_object(segment: &[u8], what: &str) -> JwtResult<Map<String, Value>> {
    let bytes = base64_url_decode(segment)
        .map_err(|_| JwtError::MalformedToken(format!("invalid {what} encoding")))?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(JwtError::MalformedToken(format!("{what} is not a JSON object"))),
        Err(_) => Err(JwtError::MalformedToken(format!("invalid {what} JSON"))),
    }
}

/// Split a token and decode its signature segment.
///
/// Returns the signing input together with the raw signature bytes.
pub(crate) fn signed_parts(token: &[u8]) -> JwtResult<(&[u8], Vec<u8>)> {
    let parts = split_token(token)?;
    let signature = base64_url_decode(parts.signature)
        .map_err(|_| JwtError::malformed("invalid signature encoding"))?;
    Ok((parts.signing_input, signature))
}
