//! Async builder tests

mod common;

use chrono::Duration;
use serde_json::json;
use sigil_jwt::{HmacAlgorithm, Jwt, JwtError, Key, Registry, SignOption, VerifyOption, alg};

#[tokio::test]
async fn test_builder_round_trip() {
    let token = Jwt::builder()
        .with_key(common::SECRET)
        .with_sign_option(SignOption::new().with_subject("user-1"))
        .sign(json!({"scope": "read"}))
        .await
        .unwrap();

    let verified = Jwt::builder()
        .with_key(common::SECRET)
        .with_verify_option(VerifyOption::new(alg::HS256).with_subject("user-1"))
        .verify(&token)
        .await
        .unwrap();

    assert_eq!(verified.sub(), Some("user-1"));
    assert_eq!(verified.claim("scope"), Some(&json!("read")));
}

#[tokio::test]
async fn test_builder_algorithm_applies_to_both_directions() {
    let private = Key::ec_p384_private_pem(common::P384_PRIVATE_PEM).unwrap();
    let public = Key::ec_p384_public_pem(common::P384_PUBLIC_PEM).unwrap();

    let token = Jwt::builder()
        .with_algorithm(alg::ES384)
        .with_key(private)
        .sign(json!({"a": 1}))
        .await
        .unwrap();

    let verified = Jwt::builder()
        .with_algorithm(alg::ES384)
        .with_key(public)
        .verify(token)
        .await
        .unwrap();
    assert_eq!(verified.alg(), Some(alg::ES384));
}

#[tokio::test]
async fn test_builder_algorithm_overrides_options() {
    let key = Key::secret(common::SECRET);
    let token = Jwt::builder()
        .with_key(key.clone())
        .with_algorithm(alg::HS512)
        .with_sign_option(SignOption::new().with_algorithm(alg::HS256))
        .sign(json!({"a": 1}))
        .await
        .unwrap();

    assert!(
        sigil_jwt::verify(&token, &key, &VerifyOption::new(alg::HS512)).is_ok()
    );
}

#[tokio::test]
async fn test_builder_without_key() {
    let result = Jwt::builder().sign(json!({"a": 1})).await;
    assert_eq!(result, Err(JwtError::EmptyKey));

    let result = Jwt::builder().sign(json!({})).await;
    assert_eq!(result, Err(JwtError::EmptyClaims));
}

#[tokio::test]
async fn test_builder_reports_expiry() {
    let token = Jwt::builder()
        .with_key(common::SECRET)
        .with_sign_option(SignOption::new().with_expires_in(Duration::seconds(-10)))
        .sign(json!({"a": 1}))
        .await
        .unwrap();

    let result = Jwt::builder()
        .with_key(common::SECRET)
        .with_algorithm(alg::HS256)
        .verify(&token)
        .await;
    assert_eq!(result, Err(JwtError::TokenExpired));
}

#[tokio::test]
async fn test_builder_verify_requires_algorithm() {
    let token = Jwt::builder()
        .with_key(common::SECRET)
        .sign(json!({"a": 1}))
        .await
        .unwrap();

    let result = Jwt::builder().with_key(common::SECRET).verify(&token).await;
    assert_eq!(result, Err(JwtError::MissingAlgorithm));

    let result = Jwt::builder()
        .with_key(common::SECRET)
        .with_verify_option(VerifyOption::new(alg::HS256))
        .verify(&token)
        .await;
    assert!(result.is_ok());
}

#[test]
fn test_builder_outside_runtime_reports_task_failure() {
    let signing = Jwt::builder().with_key(common::SECRET).sign(json!({"a": 1}));
    let verifying = Jwt::builder()
        .with_key(common::SECRET)
        .with_algorithm(alg::HS256)
        .verify("a.b.c");

    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    assert_eq!(runtime.block_on(signing), Err(JwtError::TaskFailed));
    assert_eq!(runtime.block_on(verifying), Err(JwtError::TaskFailed));
}

#[tokio::test]
async fn test_builder_custom_registry() {
    let registry = Registry::empty().register(HmacAlgorithm::hs384());

    let result = Jwt::builder()
        .with_registry(registry.clone())
        .with_key(common::SECRET)
        .sign(json!({"a": 1}))
        .await;
    assert_eq!(result, Err(JwtError::UnsupportedAlgorithm(alg::HS256.into())));

    let token = Jwt::builder()
        .with_registry(registry.clone())
        .with_algorithm(alg::HS384)
        .with_key(common::SECRET)
        .sign(json!({"a": 1}))
        .await
        .unwrap();
    let verified = Jwt::builder()
        .with_registry(registry)
        .with_algorithm(alg::HS384)
        .with_key(common::SECRET)
        .verify(token)
        .await;
    assert!(verified.is_ok());
}

#[tokio::test]
async fn test_concurrent_operations_share_the_registry() {
    let mut handles = Vec::new();
    for i in 0..16 {
        handles.push(tokio::spawn(async move {
            let token = Jwt::builder()
                .with_key(common::SECRET)
                .sign(json!({"n": i}))
                .await?;
            Jwt::builder()
                .with_key(common::SECRET)
                .with_algorithm(alg::HS256)
                .verify(token)
                .await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let verified = handle.await.unwrap().unwrap();
        assert_eq!(verified.claim("n"), Some(&json!(i)));
    }
}
