//! Compact JSON Web Token signing and verification
//!
//! This crate provides:
//! - A read-only registry of HMAC, RSA and ECDSA signing algorithms
//! - A sign pipeline that merges configured standard claims over the caller's
//!   payload without letting the payload override them
//! - A verify pipeline that dispatches on the caller's expected algorithm,
//!   never on the token's own `alg` header
//! - An async builder that runs either pipeline on the tokio runtime
//!
//! ```
//! use serde_json::json;
//! use sigil_jwt::{Key, SignOption, VerifyOption, alg, sign, verify};
//!
//! let key = Key::secret("top secret");
//! let opt = SignOption::new().with_issuer("auth.example");
//! let token = sign(&json!({"role": "admin"}), &key, Some(&opt))?;
//!
//! let verified = verify(&token, &key, &VerifyOption::new(alg::HS256).with_issuer("auth.example"))?;
//! assert_eq!(verified.claim("role"), Some(&json!("admin")));
//! # Ok::<(), sigil_jwt::JwtError>(())
//! ```

pub mod api;
mod error;
mod traits;
mod types;

pub use api::{
    AsyncJwtResult, EcdsaAlgorithm, HmacAlgorithm, Jwt, JwtBuilder, Key, Registry, RsaAlgorithm,
    SignOption, VerifyOption, sign, verify,
};
pub use error::*;
pub use traits::SigningAlgorithm;
pub use types::*;
