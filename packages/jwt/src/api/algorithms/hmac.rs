//! HMAC-based algorithm family (HS256, HS384, HS512)

use super::utils::signed_parts;
use crate::{
    api::keys::Key,
    error::{JwtError, JwtResult},
    traits::SigningAlgorithm,
    types::alg,
};
use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digest {
    Sha256,
    Sha384,
    Sha512,
}

/// HMAC-SHA2 signer keyed by a shared secret.
#[derive(Debug, Clone, Copy)]
pub struct HmacAlgorithm {
    name: &'static str,
    digest: Digest,
}

impl HmacAlgorithm {
    /// HS256
    #[must_use]
    pub const fn hs256() -> Self {
        Self {
            name: alg::HS256,
            digest: Digest::Sha256,
        }
    }

    /// HS384
    #[must_use]
    pub const fn hs384() -> Self {
        Self {
            name: alg::HS384,
            digest: Digest::Sha384,
        }
    }

    /// HS512
    #[must_use]
    pub const fn hs512() -> Self {
        Self {
            name: alg::HS512,
            digest: Digest::Sha512,
        }
    }

    fn mac(&self, message: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        let Key::Secret(secret) = key else {
            return Err(JwtError::InvalidKeyMaterial(format!(
                "{} requires a shared secret, got {}",
                self.name,
                key.kind()
            )));
        };

        match self.digest {
            Digest::Sha256 => compute::<HmacSha256>(message, secret),
            Digest::Sha384 => compute::<HmacSha384>(message, secret),
            Digest::Sha512 => compute::<HmacSha512>(message, secret),
        }
    }
}

fn compute<M: Mac + KeyInit>(message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|_| JwtError::invalid_key("Invalid HMAC key"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

impl SigningAlgorithm for HmacAlgorithm {
    fn name(&self) -> &'static str {
        self.name
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        self.mac(signing_input, key)
    }

    fn verify(&self, token: &[u8], key: &Key) -> JwtResult<()> {
        let (signing_input, signature) = signed_parts(token)?;
        let expected = self.mac(signing_input, key)?;

        if bool::from(expected.as_slice().ct_eq(signature.as_slice())) {
            Ok(())
        } else {
            Err(JwtError::InvalidSignature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::algorithms::utils::base64_url_encode;
    use hex_literal::hex;

    // RFC 4231 test case 2
    #[test]
    fn hs256_matches_rfc4231() {
        let mac = HmacAlgorithm::hs256()
            .sign(b"what do ya want for nothing?", &Key::secret("Jefe"))
            .unwrap();
        assert_eq!(
            mac,
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
    }

    #[test]
    fn output_lengths_follow_digest() {
        let key = Key::secret("k");
        assert_eq!(HmacAlgorithm::hs256().sign(b"m", &key).unwrap().len(), 32);
        assert_eq!(HmacAlgorithm::hs384().sign(b"m", &key).unwrap().len(), 48);
        assert_eq!(HmacAlgorithm::hs512().sign(b"m", &key).unwrap().len(), 64);
    }

    #[test]
    fn verify_recomputes_over_first_two_segments() {
        let key = Key::secret("secret");
        let alg = HmacAlgorithm::hs256();
        let signature = alg.sign(b"aGVhZA.Ym9keQ", &key).unwrap();
        let token = format!("aGVhZA.Ym9keQ.{}", base64_url_encode(&signature));

        assert!(alg.verify(token.as_bytes(), &key).is_ok());
        assert_eq!(
            alg.verify(token.as_bytes(), &Key::secret("other")),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn rejects_asymmetric_keys() {
        let signing = p256::ecdsa::SigningKey::from_slice(&[0x22; 32]).unwrap();
        let err = HmacAlgorithm::hs256()
            .sign(b"m", &Key::from(signing))
            .unwrap_err();
        assert!(matches!(err, JwtError::InvalidKeyMaterial(_)));
    }
}
