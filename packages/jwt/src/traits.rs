//! Core signing algorithm trait.

use crate::{api::keys::Key, error::JwtResult};

/// Signing algorithm interface.
///
/// One implementation per algorithm family; instances are stateless and
/// looked up by [`SigningAlgorithm::name`] in a [`Registry`](crate::Registry).
/// Implementations must be thread-safe (Send + Sync).
pub trait SigningAlgorithm: Send + Sync + 'static {
    /// Header `alg` value this implementation answers to.
    fn name(&self) -> &'static str;

    /// Sign `base64(header) "." base64(payload)` and return raw signature bytes.
    fn sign(&self, signing_input: &[u8], key: &Key) -> JwtResult<Vec<u8>>;

    /// Check the signature of a complete `header.payload.signature` token.
    ///
    /// The implementation derives the signing input itself and must compare
    /// in constant time.
    fn verify(&self, token: &[u8], key: &Key) -> JwtResult<()>;
}

/// Implementation of SigningAlgorithm for Arc<T> to allow shared ownership.
impl<T: SigningAlgorithm> SigningAlgorithm for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        (**self).sign(signing_input, key)
    }

    fn verify(&self, token: &[u8], key: &Key) -> JwtResult<()> {
        (**self).verify(token, key)
    }
}
