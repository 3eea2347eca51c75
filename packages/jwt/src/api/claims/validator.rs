//! Claim policy applied after the signature has been checked
//!
//! Checks run in a fixed order (`exp`, `nbf`, `iss`, `aud`, `sub`) so the
//! first failing check decides the error.

use crate::{
    api::options::VerifyOption,
    error::{JwtError, JwtResult},
    types::Payload,
};
use serde_json::Value;

/// Claim constraints for one verification, borrowed from a [`VerifyOption`].
#[derive(Debug, Clone, Copy)]
pub struct ClaimsValidator<'a> {
    opt: &'a VerifyOption,
    now: i64,
}

impl<'a> ClaimsValidator<'a> {
    /// Validate against `opt` at epoch second `now`.
    #[inline]
    #[must_use]
    pub fn new(opt: &'a VerifyOption, now: i64) -> Self {
        Self { opt, now }
    }

    /// Run every configured check.
    ///
    /// # Errors
    /// The first violated constraint, or `InvalidClaims` if `exp`/`nbf` is
    /// present but not numeric.
    pub fn validate(&self, claims: &Payload) -> JwtResult<()> {
        let tolerance = self.opt.clock_tolerance.num_seconds();

        if !self.opt.ignore_expiration {
            if let Some(exp) = numeric_date(claims, "exp")? {
                if self.now > exp.saturating_add(tolerance) {
                    return Err(JwtError::TokenExpired);
                }
            }
        }

        if let Some(nbf) = numeric_date(claims, "nbf")? {
            if self.now.saturating_add(tolerance) < nbf {
                return Err(JwtError::TokenNotYetValid);
            }
        }

        if let Some(expected) = &self.opt.issuer {
            if claims.get("iss").and_then(Value::as_str) != Some(expected.as_str()) {
                return Err(JwtError::IssuerMismatch);
            }
        }

        if let Some(expected) = &self.opt.audience {
            if !audience_matches(claims.get("aud"), expected) {
                return Err(JwtError::AudienceMismatch);
            }
        }

        if let Some(expected) = &self.opt.subject {
            if claims.get("sub").and_then(Value::as_str) != Some(expected.as_str()) {
                return Err(JwtError::SubjectMismatch);
            }
        }

        Ok(())
    }
}

/// `aud` may be a single string or an array of strings.
fn audience_matches(aud: Option<&Value>, expected: &str) -> bool {
    match aud {
        Some(Value::String(aud)) => aud == expected,
        Some(Value::Array(values)) => values.iter().any(|v| v.as_str() == Some(expected)),
        _ => false,
    }
}

/// Read an epoch-seconds claim. Fractional values are floored.
fn numeric_date(claims: &Payload, name: &str) -> JwtResult<Option<i64>> {
    match claims.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64))
            .map(Some)
            .ok_or_else(|| JwtError::InvalidClaims(format!("{name} is out of range"))),
        Some(_) => Err(JwtError::InvalidClaims(format!("{name} must be a number"))),
    }
}
