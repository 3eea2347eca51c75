//! ECDSA-based algorithm family (ES256, ES384)
//!
//! Signatures are the fixed-width `r || s` concatenation JWS expects,
//! not DER. Nonces are deterministic (RFC 6979).

use super::utils::signed_parts;
use crate::{
    api::keys::Key,
    error::{JwtError, JwtResult},
    traits::SigningAlgorithm,
    types::alg,
};
use p256::ecdsa::signature::{Signer, Verifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Curve {
    P256,
    P384,
}

/// ECDSA signer over a NIST prime curve.
#[derive(Debug, Clone, Copy)]
pub struct EcdsaAlgorithm {
    name: &'static str,
    curve: Curve,
}

impl EcdsaAlgorithm {
    /// ES256
    #[must_use]
    pub const fn es256() -> Self {
        Self {
            name: alg::ES256,
            curve: Curve::P256,
        }
    }

    /// ES384
    #[must_use]
    pub const fn es384() -> Self {
        Self {
            name: alg::ES384,
            curve: Curve::P384,
        }
    }

    fn wrong_key(&self, action: &str, key: &Key) -> JwtError {
        JwtError::InvalidKeyMaterial(format!(
            "{} {action} requires a {} key, got {}",
            self.name,
            match self.curve {
                Curve::P256 => "P-256",
                Curve::P384 => "P-384",
            },
            key.kind()
        ))
    }
}

impl SigningAlgorithm for EcdsaAlgorithm {
    fn name(&self) -> &'static str {
        self.name
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        match (self.curve, key) {
            (Curve::P256, Key::EcP256Private(signing_key)) => {
                let signature: p256::ecdsa::Signature = signing_key
                    .try_sign(signing_input)
                    .map_err(|e| JwtError::InvalidKeyMaterial(format!("ES256 signing failed: {e}")))?;
                Ok(signature.to_bytes().to_vec())
            }
            (Curve::P384, Key::EcP384Private(signing_key)) => {
                let signature: p384::ecdsa::Signature = signing_key
                    .try_sign(signing_input)
                    .map_err(|e| JwtError::InvalidKeyMaterial(format!("ES384 signing failed: {e}")))?;
                Ok(signature.to_bytes().to_vec())
            }
            _ => Err(self.wrong_key("signing", key)),
        }
    }

    fn verify(&self, token: &[u8], key: &Key) -> JwtResult<()> {
        let verified = match (self.curve, key) {
            (Curve::P256, Key::EcP256Private(_) | Key::EcP256Public(_)) => {
                let (signing_input, signature) = signed_parts(token)?;
                let signature = p256::ecdsa::Signature::from_slice(&signature)
                    .map_err(|_| JwtError::InvalidSignature)?;
                match key {
                    Key::EcP256Private(k) => k.verifying_key().verify(signing_input, &signature),
                    Key::EcP256Public(k) => k.verify(signing_input, &signature),
                    _ => return Err(self.wrong_key("verification", key)),
                }
            }
            (Curve::P384, Key::EcP384Private(_) | Key::EcP384Public(_)) => {
                let (signing_input, signature) = signed_parts(token)?;
                let signature = p384::ecdsa::Signature::from_slice(&signature)
                    .map_err(|_| JwtError::InvalidSignature)?;
                match key {
                    Key::EcP384Private(k) => k.verifying_key().verify(signing_input, &signature),
                    Key::EcP384Public(k) => k.verify(signing_input, &signature),
                    _ => return Err(self.wrong_key("verification", key)),
                }
            }
            _ => return Err(self.wrong_key("verification", key)),
        };

        verified.map_err(|_| JwtError::InvalidSignature)
    }
}
