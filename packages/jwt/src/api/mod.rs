//! Token API
//!
//! The registry and the two pipelines, plus the async builder layered on top.

pub mod algorithms;
mod async_result;
pub mod builder;
pub mod claims;
pub mod keys;
pub mod options;
mod sign;
mod verify;

pub use algorithms::{EcdsaAlgorithm, HmacAlgorithm, Registry, RsaAlgorithm};
pub use async_result::AsyncJwtResult;
pub use builder::{Jwt, JwtBuilder};
pub use keys::Key;
pub use options::{SignOption, VerifyOption};
pub use sign::sign;
pub use verify::verify;
