//! Key material handed to the sign and verify pipelines
//!
//! Keys are caller-owned. The pipelines only borrow them for the duration of a
//! call and never store them.

use crate::error::{JwtError, JwtResult};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs8::{DecodePrivateKey, DecodePublicKey},
};
use std::fmt;
use zeroize::Zeroizing;

/// Secret or asymmetric key for one algorithm family.
#[derive(Clone)]
pub enum Key {
    /// Shared secret for the HMAC algorithms; zeroized on drop
    Secret(Zeroizing<Vec<u8>>),
    /// RSA private key (signs, and verifies via its public half)
    RsaPrivate(RsaPrivateKey),
    /// RSA public key (verifies only)
    RsaPublic(RsaPublicKey),
    /// P-256 signing key
    EcP256Private(p256::ecdsa::SigningKey),
    /// P-256 verifying key
    EcP256Public(p256::ecdsa::VerifyingKey),
    /// P-384 signing key
    EcP384Private(p384::ecdsa::SigningKey),
    /// P-384 verifying key
    EcP384Public(p384::ecdsa::VerifyingKey),
}

impl Key {
    /// Wrap a shared secret. Strings and byte slices are both accepted.
    #[must_use]
    pub fn secret(secret: impl AsRef<[u8]>) -> Self {
        Key::Secret(Zeroizing::new(secret.as_ref().to_vec()))
    }

    /// Parse a PKCS#8 DER encoded RSA private key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the bytes are not a valid key.
    pub fn rsa_private_der(der: &[u8]) -> JwtResult<Self> {
        RsaPrivateKey::from_pkcs8_der(der)
            .map(Key::RsaPrivate)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid RSA private key: {e}")))
    }

    /// Parse a PKCS#8 PEM encoded RSA private key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the text is not a valid key.
    pub fn rsa_private_pem(pem: &str) -> JwtResult<Self> {
        RsaPrivateKey::from_pkcs8_pem(pem)
            .map(Key::RsaPrivate)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid RSA private key: {e}")))
    }

    /// Parse an SPKI DER encoded RSA public key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the bytes are not a valid key.
    pub fn rsa_public_der(der: &[u8]) -> JwtResult<Self> {
        RsaPublicKey::from_public_key_der(der)
            .map(Key::RsaPublic)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid RSA public key: {e}")))
    }

    /// Parse an SPKI PEM encoded RSA public key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the text is not a valid key.
    pub fn rsa_public_pem(pem: &str) -> JwtResult<Self> {
        RsaPublicKey::from_public_key_pem(pem)
            .map(Key::RsaPublic)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid RSA public key: {e}")))
    }

    /// Parse a PKCS#8 DER encoded P-256 private key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the bytes are not a valid key.
    pub fn ec_p256_private_der(der: &[u8]) -> JwtResult<Self> {
        p256::ecdsa::SigningKey::from_pkcs8_der(der)
            .map(Key::EcP256Private)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid P-256 private key: {e}")))
    }

    /// Parse an SPKI DER encoded P-256 public key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the bytes are not a valid key.
    pub fn ec_p256_public_der(der: &[u8]) -> JwtResult<Self> {
        p256::ecdsa::VerifyingKey::from_public_key_der(der)
            .map(Key::EcP256Public)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid P-256 public key: {e}")))
    }

    /// Parse a PKCS#8 DER encoded P-384 private key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the bytes are not a valid key.
    pub fn ec_p384_private_der(der: &[u8]) -> JwtResult<Self> {
        p384::ecdsa::SigningKey::from_pkcs8_der(der)
            .map(Key::EcP384Private)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid P-384 private key: {e}")))
    }

    /// Parse an SPKI DER encoded P-384 public key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the bytes are not a valid key.
    pub fn ec_p384_public_der(der: &[u8]) -> JwtResult<Self> {
        p384::ecdsa::VerifyingKey::from_public_key_der(der)
            .map(Key::EcP384Public)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid P-384 public key: {e}")))
    }

    /// Parse a PKCS#8 PEM encoded P-256 private key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the text is not a valid key.
    pub fn ec_p256_private_pem(pem: &str) -> JwtResult<Self> {
        p256::ecdsa::SigningKey::from_pkcs8_pem(pem)
            .map(Key::EcP256Private)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid P-256 private key: {e}")))
    }

    /// Parse an SPKI PEM encoded P-256 public key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the text is not a valid key.
    pub fn ec_p256_public_pem(pem: &str) -> JwtResult<Self> {
        p256::ecdsa::VerifyingKey::from_public_key_pem(pem)
            .map(Key::EcP256Public)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid P-256 public key: {e}")))
    }

    /// Parse a PKCS#8 PEM encoded P-384 private key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the text is not a valid key.
    pub fn ec_p384_private_pem(pem: &str) -> JwtResult<Self> {
        p384::ecdsa::SigningKey::from_pkcs8_pem(pem)
            .map(Key::EcP384Private)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid P-384 private key: {e}")))
    }

    /// Parse an SPKI PEM encoded P-384 public key.
    ///
    /// # Errors
    /// Returns `InvalidKeyMaterial` if the text is not a valid key.
    pub fn ec_p384_public_pem(pem: &str) -> JwtResult<Self> {
        p384::ecdsa::VerifyingKey::from_public_key_pem(pem)
            .map(Key::EcP384Public)
            .map_err(|e| JwtError::InvalidKeyMaterial(format!("Invalid P-384 public key: {e}")))
    }

    /// Public half of an asymmetric private key; public keys map to themselves.
    ///
    /// Returns `None` for shared secrets.
    #[must_use]
    pub fn to_public(&self) -> Option<Key> {
        match self {
            Key::Secret(_) => None,
            Key::RsaPrivate(k) => Some(Key::RsaPublic(k.to_public_key())),
            Key::RsaPublic(k) => Some(Key::RsaPublic(k.clone())),
            Key::EcP256Private(k) => Some(Key::EcP256Public(k.verifying_key().clone())),
            Key::EcP256Public(k) => Some(Key::EcP256Public(k.clone())),
            Key::EcP384Private(k) => Some(Key::EcP384Public(k.verifying_key().clone())),
            Key::EcP384Public(k) => Some(Key::EcP384Public(k.clone())),
        }
    }

    /// Short name of the key kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Secret(_) => "secret",
            Key::RsaPrivate(_) => "RSA private key",
            Key::RsaPublic(_) => "RSA public key",
            Key::EcP256Private(_) => "P-256 private key",
            Key::EcP256Public(_) => "P-256 public key",
            Key::EcP384Private(_) => "P-384 private key",
            Key::EcP384Public(_) => "P-384 public key",
        }
    }

    /// True for a shared secret with no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Key::Secret(secret) if secret.is_empty())
    }
}

// Never print key bytes.
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.kind()).finish()
    }
}

impl From<&str> for Key {
    fn from(secret: &str) -> Self {
        Key::secret(secret)
    }
}

impl From<&[u8]> for Key {
    fn from(secret: &[u8]) -> Self {
        Key::secret(secret)
    }
}

impl From<Vec<u8>> for Key {
    fn from(secret: Vec<u8>) -> Self {
        Key::Secret(Zeroizing::new(secret))
    }
}

impl From<RsaPrivateKey> for Key {
    fn from(key: RsaPrivateKey) -> Self {
        Key::RsaPrivate(key)
    }
}

impl From<RsaPublicKey> for Key {
    fn from(key: RsaPublicKey) -> Self {
        Key::RsaPublic(key)
    }
}

impl From<p256::ecdsa::SigningKey> for Key {
    fn from(key: p256::ecdsa::SigningKey) -> Self {
        Key::EcP256Private(key)
    }
}

impl From<p256::ecdsa::VerifyingKey> for Key {
    fn from(key: p256::ecdsa::VerifyingKey) -> Self {
        Key::EcP256Public(key)
    }
}

impl From<p384::ecdsa::SigningKey> for Key {
    fn from(key: p384::ecdsa::SigningKey) -> Self {
        Key::EcP384Private(key)
    }
}

impl From<p384::ecdsa::VerifyingKey> for Key {
    fn from(key: p384::ecdsa::VerifyingKey) -> Self {
        Key::EcP384Public(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_empty() {
        assert!(Key::secret("").is_empty());
        assert!(!Key::secret("s3cr3t").is_empty());
    }

    #[test]
    fn debug_hides_secret_bytes() {
        let rendered = format!("{:?}", Key::secret("hunter2"));
        assert_eq!(rendered, "Key(\"secret\")");
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn secret_has_no_public_half() {
        assert!(Key::secret("abc").to_public().is_none());
    }

    #[test]
    fn p256_private_derives_public() {
        let signing = p256::ecdsa::SigningKey::from_slice(&[0x11; 32]).unwrap();
        let public = Key::from(signing.clone()).to_public().unwrap();
        assert!(matches!(public, Key::EcP256Public(vk) if vk == *signing.verifying_key()));
    }

    #[test]
    fn garbage_der_is_invalid_key_material() {
        for result in [
            Key::rsa_private_der(b"not a key"),
            Key::rsa_public_der(b"not a key"),
            Key::ec_p256_private_der(b"not a key"),
            Key::ec_p384_public_der(b"not a key"),
        ] {
            assert!(matches!(result, Err(JwtError::InvalidKeyMaterial(_))));
        }
    }

    #[test]
    fn garbage_pem_is_invalid_key_material() {
        let pem = "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n";
        assert!(matches!(
            Key::ec_p384_public_pem(pem),
            Err(JwtError::InvalidKeyMaterial(_))
        ));
    }
}
