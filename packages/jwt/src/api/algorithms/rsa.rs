//! RSA-based algorithm family (RS256, RS384, RS512)
//!
//! RSASSA-PKCS1-v1_5. Signing needs the private key; verification takes the
//! public key or derives it from a private one.

use super::utils::signed_parts;
use crate::{
    api::keys::Key,
    error::{JwtError, JwtResult},
    traits::SigningAlgorithm,
    types::alg,
};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digest {
    Sha256,
    Sha384,
    Sha512,
}

macro_rules! pkcs1v15_sign {
    ($digest:ty, $key:expr, $message:expr) => {
        SigningKey::<$digest>::new($key.clone())
            .try_sign($message)
            .map(|signature| signature.to_vec())
    };
}

macro_rules! pkcs1v15_verify {
    ($digest:ty, $key:expr, $message:expr, $signature:expr) => {
        VerifyingKey::<$digest>::new($key).verify($message, $signature)
    };
}

/// RSASSA-PKCS1-v1_5 signer.
#[derive(Debug, Clone, Copy)]
pub struct RsaAlgorithm {
    name: &'static str,
    digest: Digest,
}

impl RsaAlgorithm {
    /// RS256
    #[must_use]
    pub const fn rs256() -> Self {
        Self {
            name: alg::RS256,
            digest: Digest::Sha256,
        }
    }

    /// RS384
    #[must_use]
    pub const fn rs384() -> Self {
        Self {
            name: alg::RS384,
            digest: Digest::Sha384,
        }
    }

    /// RS512
    #[must_use]
    pub const fn rs512() -> Self {
        Self {
            name: alg::RS512,
            digest: Digest::Sha512,
        }
    }

    fn private_key<'k>(&self, key: &'k Key) -> JwtResult<&'k RsaPrivateKey> {
        match key {
            Key::RsaPrivate(k) => Ok(k),
            other => Err(JwtError::InvalidKeyMaterial(format!(
                "{} signing requires an RSA private key, got {}",
                self.name,
                other.kind()
            ))),
        }
    }

    fn public_key(&self, key: &Key) -> JwtResult<RsaPublicKey> {
        match key {
            Key::RsaPublic(k) => Ok(k.clone()),
            Key::RsaPrivate(k) => Ok(k.to_public_key()),
            other => Err(JwtError::InvalidKeyMaterial(format!(
                "{} verification requires an RSA key, got {}",
                self.name,
                other.kind()
            ))),
        }
    }
}

impl SigningAlgorithm for RsaAlgorithm {
    fn name(&self) -> &'static str {
        self.name
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        let private_key = self.private_key(key)?;

        let signature = match self.digest {
            Digest::Sha256 => pkcs1v15_sign!(Sha256, private_key, signing_input),
            Digest::Sha384 => pkcs1v15_sign!(Sha384, private_key, signing_input),
            Digest::Sha512 => pkcs1v15_sign!(Sha512, private_key, signing_input),
        };

        signature.map_err(|e| JwtError::InvalidKeyMaterial(format!("RSA signing failed: {e}")))
    }

    fn verify(&self, token: &[u8], key: &Key) -> JwtResult<()> {
        let public_key = self.public_key(key)?;
        let (signing_input, signature) = signed_parts(token)?;
        let signature =
            Signature::try_from(signature.as_slice()).map_err(|_| JwtError::InvalidSignature)?;

        let outcome = match self.digest {
            Digest::Sha256 => pkcs1v15_verify!(Sha256, public_key, signing_input, &signature),
            Digest::Sha384 => pkcs1v15_verify!(Sha384, public_key, signing_input, &signature),
            Digest::Sha512 => pkcs1v15_verify!(Sha512, public_key, signing_input, &signature),
        };

        outcome.map_err(|_| JwtError::InvalidSignature)
    }
}
