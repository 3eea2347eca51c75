//! Key fixtures shared by the integration tests

#![allow(dead_code)]

use sigil_jwt::{Key, alg};

pub const RSA_PRIVATE_PEM: &str = include_str!("../keys/rsa_private.pem");
pub const RSA_PUBLIC_PEM: &str = include_str!("../keys/rsa_public.pem");
pub const RSA_OTHER_PRIVATE_PEM: &str = include_str!("../keys/rsa_other_private.pem");
pub const P256_PRIVATE_PEM: &str = include_str!("../keys/p256_private.pem");
pub const P256_PUBLIC_PEM: &str = include_str!("../keys/p256_public.pem");
pub const P384_PRIVATE_PEM: &str = include_str!("../keys/p384_private.pem");
pub const P384_PUBLIC_PEM: &str = include_str!("../keys/p384_public.pem");

pub const SECRET: &str = "correct horse battery staple";

/// (algorithm, signing key, verification key) for every standard algorithm.
pub fn key_pairs() -> Vec<(&'static str, Key, Key)> {
    let rsa_private = Key::rsa_private_pem(RSA_PRIVATE_PEM).unwrap();
    let rsa_public = Key::rsa_public_pem(RSA_PUBLIC_PEM).unwrap();
    let p256_private = Key::ec_p256_private_pem(P256_PRIVATE_PEM).unwrap();
    let p256_public = Key::ec_p256_public_pem(P256_PUBLIC_PEM).unwrap();
    let p384_private = Key::ec_p384_private_pem(P384_PRIVATE_PEM).unwrap();
    let p384_public = Key::ec_p384_public_pem(P384_PUBLIC_PEM).unwrap();

    vec![
        (alg::HS256, Key::secret(SECRET), Key::secret(SECRET)),
        (alg::HS384, Key::secret(SECRET), Key::secret(SECRET)),
        (alg::HS512, Key::secret(SECRET), Key::secret(SECRET)),
        (alg::RS256, rsa_private.clone(), rsa_public.clone()),
        (alg::RS384, rsa_private.clone(), rsa_public.clone()),
        (alg::RS512, rsa_private, rsa_public),
        (alg::ES256, p256_private, p256_public),
        (alg::ES384, p384_private, p384_public),
    ]
}
