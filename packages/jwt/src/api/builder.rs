//! Async builder entry point
//!
//! Configuration is collected on the builder, then `sign` or `verify` moves it
//! into a tokio task running the synchronous pipeline and hands back an
//! [`AsyncJwtResult`].

use super::{
    algorithms::Registry,
    async_result::AsyncJwtResult,
    keys::Key,
    options::{SignOption, VerifyOption},
};
use crate::{
    error::{JwtError, JwtResult},
    types::VerifiedToken,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Direct builder entry point.
pub struct Jwt;

impl Jwt {
    /// Start configuring an operation.
    #[inline]
    #[must_use]
    pub fn builder() -> JwtBuilder {
        JwtBuilder::new()
    }
}

/// Collects key, algorithm and options for one async sign or verify.
#[derive(Debug, Clone, Default)]
pub struct JwtBuilder {
    key: Option<Key>,
    algorithm: Option<String>,
    sign_option: Option<SignOption>,
    verify_option: Option<VerifyOption>,
    registry: Option<Arc<Registry>>,
}

impl JwtBuilder {
    /// Empty builder: no key, global registry. Signing defaults to HS256;
    /// verifying needs an algorithm from [`with_algorithm`](Self::with_algorithm)
    /// or [`with_verify_option`](Self::with_verify_option).
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key used for signing or verification.
    #[inline]
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Algorithm for both directions. Overrides the algorithm in any option
    /// passed to this builder.
    #[inline]
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Options for [`sign`](Self::sign).
    #[inline]
    #[must_use]
    pub fn with_sign_option(mut self, opt: SignOption) -> Self {
        self.sign_option = Some(opt);
        self
    }

    /// Options for [`verify`](Self::verify).
    #[inline]
    #[must_use]
    pub fn with_verify_option(mut self, opt: VerifyOption) -> Self {
        self.verify_option = Some(opt);
        self
    }

    /// Use `registry` instead of the global one.
    #[inline]
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    fn sign_option(&self) -> SignOption {
        let opt = self.sign_option.clone().unwrap_or_default();
        match &self.algorithm {
            Some(algorithm) => opt.with_algorithm(algorithm.clone()),
            None => opt,
        }
    }

    fn verify_option(&self) -> JwtResult<VerifyOption> {
        match (&self.verify_option, &self.algorithm) {
            (Some(opt), Some(algorithm)) => Ok(VerifyOption {
                algorithm: algorithm.clone(),
                ..opt.clone()
            }),
            (Some(opt), None) => Ok(opt.clone()),
            (None, Some(algorithm)) => Ok(VerifyOption::new(algorithm.clone())),
            (None, None) => Err(JwtError::MissingAlgorithm),
        }
    }

    /// Sign `claims` on the tokio runtime.
    ///
    /// Resolves to `TaskFailed` when called outside a runtime.
    pub fn sign<C>(self, claims: C) -> AsyncJwtResult<Vec<u8>>
    where
        C: Serialize + Send + 'static,
    {
        let opt = self.sign_option();
        self.spawn(move |registry, key| registry.sign(&claims, key, Some(&opt)))
    }

    /// Verify `token` on the tokio runtime.
    ///
    /// Resolves to `MissingAlgorithm` when no algorithm was named, and to
    /// `TaskFailed` when called outside a runtime.
    pub fn verify(self, token: impl AsRef<[u8]>) -> AsyncJwtResult<VerifiedToken> {
        let opt = match self.verify_option() {
            Ok(opt) => opt,
            Err(err) => return AsyncJwtResult::ready(Err(err)),
        };
        let token = token.as_ref().to_vec();
        self.spawn(move |registry, key| registry.verify(&token, key, &opt))
    }

    fn spawn<T, F>(self, operation: F) -> AsyncJwtResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Registry, &Key) -> JwtResult<T> + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no tokio runtime for async token operation");
            return AsyncJwtResult::ready(Err(JwtError::TaskFailed));
        };

        let (tx, rx) = oneshot::channel();
        let Self { key, registry, .. } = self;

        runtime.spawn(async move {
            // A missing key runs as an empty secret so the pipeline reports
            // `EmptyKey` in its usual order.
            let key = key.unwrap_or_else(|| Key::secret(b""));
            let registry = registry.as_deref().unwrap_or_else(|| Registry::global());
            let _ = tx.send(operation(registry, &key));
        });

        AsyncJwtResult::new(rx)
    }
}
