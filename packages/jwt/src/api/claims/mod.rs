//! Claim construction and claim policy

mod merge;
mod validator;

pub use merge::{build_claims, build_header, payload_from_value};
pub use validator::ClaimsValidator;
