//! Shared fixtures and proptest generators for integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use token_core::crypto::{RsaPrivateKey, RsaPublicKey};
use token_core::jwt::Payload;

/// 2048-bit RSA key, PKCS#8 DER.
pub const RSA_PKCS8_DER: &[u8] = include_bytes!("../fixtures/rsa_2048_pkcs8.der");
/// Same key, PKCS#1 DER.
pub const RSA_PKCS1_DER: &[u8] = include_bytes!("../fixtures/rsa_2048_pkcs1.der");
/// Public half, PKCS#1 `RSAPublicKey` DER.
pub const RSA_PUBLIC_PKCS1_DER: &[u8] = include_bytes!("../fixtures/rsa_2048_public_pkcs1.der");

pub fn rsa_private_key() -> RsaPrivateKey {
    RsaPrivateKey::from_pkcs8_der(RSA_PKCS8_DER).unwrap()
}

pub fn rsa_public_key() -> RsaPublicKey {
    RsaPublicKey::from_pkcs1_der(RSA_PUBLIC_PKCS1_DER.to_vec())
}

/// Generate arbitrary issuer strings.
pub fn arb_issuer() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9-]{0,63}"
}

/// Generate arbitrary subject strings.
pub fn arb_subject() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,128}"
}

/// Generate arbitrary audience lists.
pub fn arb_audience() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z][a-zA-Z0-9-]{0,31}", 1..5)
}

/// Generate custom claims whose names cannot collide with registered ones.
pub fn arb_custom_claims() -> impl Strategy<Value = Vec<(String, serde_json::Value)>> {
    prop::collection::vec(
        (
            "x_[a-z]{1,12}",
            prop_oneof![
                any::<i64>().prop_map(serde_json::Value::from),
                any::<bool>().prop_map(serde_json::Value::from),
                "[ -~]{0,24}".prop_map(serde_json::Value::from),
            ],
        ),
        0..5,
    )
}

/// Generate payloads with every registered claim optional.
pub fn arb_payload() -> impl Strategy<Value = Payload> {
    (
        prop::option::of(arb_issuer()),
        prop::option::of(arb_audience()),
        prop::option::of(arb_subject()),
        prop::option::of(0i64..4_000_000_000),
        prop::option::of(0i64..4_000_000_000),
        prop::option::of("[a-f0-9]{32}"),
        arb_custom_claims(),
    )
        .prop_map(|(iss, aud, sub, iat, exp, jti, custom)| {
            let mut payload = Payload::new();
            payload.iss = iss;
            payload.aud = aud.map(Into::into);
            payload.sub = sub;
            payload.iat = iat;
            payload.exp = exp;
            payload.jti = jti;
            for (key, value) in custom {
                payload = payload.with_custom_claim(key, value);
            }
            payload
        })
}
