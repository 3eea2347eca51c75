//! Sign and verify options
//!
//! Both option types deserialize from any serde format so they can live in a
//! service's configuration file. Durations are written as whole seconds.

use crate::types::{Header, alg};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Options for [`sign`](crate::sign). `None` means all defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignOption {
    /// Algorithm identifier; [`alg::DEFAULT`] when unset.
    pub algorithm: Option<String>,
    /// Lifetime; becomes `exp = iat + expires_in`. Zero counts as unset.
    #[serde(rename = "expires_in_seconds", with = "optional_seconds")]
    pub expires_in: Option<Duration>,
    /// Activation delay; becomes `nbf = iat + not_before`. Zero counts as unset.
    #[serde(rename = "not_before_seconds", with = "optional_seconds")]
    pub not_before: Option<Duration>,
    /// `aud` claim.
    pub audience: Option<String>,
    /// `iss` claim.
    pub issuer: Option<String>,
    /// `sub` claim.
    pub subject: Option<String>,
    /// Extra header fields. `alg` and `typ` are never overridden.
    pub header: Option<Header>,
}

impl SignOption {
    /// All defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Set the lifetime.
    #[must_use]
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    /// Set the activation delay.
    #[must_use]
    pub fn with_not_before(mut self, not_before: Duration) -> Self {
        self.not_before = Some(not_before);
        self
    }

    /// Set the audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set the issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the extension header.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }

    /// The algorithm Sign will use.
    #[must_use]
    pub fn algorithm_or_default(&self) -> &str {
        self.algorithm.as_deref().unwrap_or(alg::DEFAULT)
    }
}

/// Options for [`verify`](crate::verify).
///
/// There is no default: the caller always names the expected algorithm, and
/// the token's own `alg` header is never consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyOption {
    /// Algorithm the token must have been signed with.
    pub algorithm: String,
    /// Skip the `exp` check.
    #[serde(default)]
    pub ignore_expiration: bool,
    /// Expected `aud`.
    #[serde(default)]
    pub audience: Option<String>,
    /// Expected `sub`.
    #[serde(default)]
    pub subject: Option<String>,
    /// Expected `iss`.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Allowed clock skew for `exp` and `nbf`.
    #[serde(
        default = "Duration::zero",
        rename = "clock_tolerance_seconds",
        with = "seconds"
    )]
    pub clock_tolerance: Duration,
}

impl VerifyOption {
    /// Expect `algorithm`, enforce expiry, no other constraints.
    #[must_use]
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            ignore_expiration: false,
            audience: None,
            subject: None,
            issuer: None,
            clock_tolerance: Duration::zero(),
        }
    }

    /// Skip (or re-enable) the `exp` check.
    #[must_use]
    pub fn with_ignore_expiration(mut self, ignore: bool) -> Self {
        self.ignore_expiration = ignore;
        self
    }

    /// Require `aud` to match.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Require `sub` to match.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Require `iss` to match.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the allowed clock skew.
    #[must_use]
    pub fn with_clock_tolerance(mut self, tolerance: Duration) -> Self {
        self.clock_tolerance = tolerance;
        self
    }
}

fn out_of_range<E: serde::de::Error>(secs: i64) -> E {
    E::custom(format!("duration of {secs} seconds is out of range"))
}

mod seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        Duration::try_seconds(secs).ok_or_else(|| super::out_of_range(secs))
    }
}

mod optional_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match duration {
            Some(duration) => serializer.serialize_some(&duration.num_seconds()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        match Option::<i64>::deserialize(deserializer)? {
            Some(secs) => Duration::try_seconds(secs)
                .map(Some)
                .ok_or_else(|| super::out_of_range(secs)),
            None => Ok(None),
        }
    }
}
