//! Algorithm registry
//!
//! A fixed mapping from `alg` identifier to a [`SigningAlgorithm`]. The
//! registry is assembled once and is read-only afterwards, so it can be
//! shared freely across threads.

mod ecdsa;
mod hmac;
mod rsa;
pub(crate) mod utils;

pub use self::ecdsa::EcdsaAlgorithm;
pub use self::hmac::HmacAlgorithm;
pub use self::rsa::RsaAlgorithm;

use crate::{
    error::{JwtError, JwtResult},
    traits::SigningAlgorithm,
};
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt, sync::Arc};

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::standard);

/// Immutable lookup table of signing algorithms.
#[derive(Clone, Default)]
pub struct Registry {
    algorithms: HashMap<&'static str, Arc<dyn SigningAlgorithm>>,
}

impl Registry {
    /// A registry with nothing registered.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// HS256/384/512, RS256/384/512, ES256 and ES384.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .register(HmacAlgorithm::hs256())
            .register(HmacAlgorithm::hs384())
            .register(HmacAlgorithm::hs512())
            .register(RsaAlgorithm::rs256())
            .register(RsaAlgorithm::rs384())
            .register(RsaAlgorithm::rs512())
            .register(EcdsaAlgorithm::es256())
            .register(EcdsaAlgorithm::es384())
    }

    /// The process-wide standard registry used by [`sign`](crate::sign) and
    /// [`verify`](crate::verify).
    #[must_use]
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Add an algorithm, replacing any previous entry with the same name.
    #[must_use]
    pub fn register<A: SigningAlgorithm>(mut self, algorithm: A) -> Self {
        self.algorithms.insert(algorithm.name(), Arc::new(algorithm));
        self
    }

    /// Look up an algorithm by identifier.
    ///
    /// # Errors
    /// Returns `UnsupportedAlgorithm` if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> JwtResult<&dyn SigningAlgorithm> {
        tracing::trace!(alg = name, "resolving algorithm");
        self.algorithms
            .get(name)
            .map(|algorithm| algorithm.as_ref())
            .ok_or_else(|| JwtError::unsupported_algorithm(name))
    }

    /// True if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// Registered identifiers, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.algorithms.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("algorithms", &self.names())
            .finish()
    }
}
