//! RSA signing against fixed key fixtures.

mod common;

use common::{rsa_private_key, rsa_public_key, RSA_PKCS1_DER, RSA_PUBLIC_PKCS1_DER};
use proptest::prelude::*;
use token_core::codec;
use token_core::crypto::{
    Algorithm, MacKey, RsaDigest, RsaPrivateKey, RsaPublicKey, RsaSigner, SigningKey,
    VerificationKey,
};
use token_core::jwt::{Header, Payload, TokenCodec};
use token_core::TokenError;

#[test]
fn test_public_key_matches_fixture() {
    assert_eq!(rsa_private_key().public_key(), rsa_public_key());
    assert_eq!(rsa_private_key().modulus_len(), 256);
}

#[test]
fn test_pkcs1_and_pkcs8_sign_identically() {
    // PKCS#1 v1.5 signatures are deterministic.
    let signer = RsaSigner::new(RsaDigest::Sha256);
    let pkcs1 = RsaPrivateKey::from_pkcs1_der(RSA_PKCS1_DER).unwrap();

    let a = signer.sign(&rsa_private_key(), b"message").unwrap();
    let b = signer.sign(&pkcs1, b"message").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 256);
}

#[test]
fn test_sign_verify_all_digests() {
    let key = rsa_private_key();
    let public = rsa_public_key();

    for digest in [RsaDigest::Sha256, RsaDigest::Sha384, RsaDigest::Sha512] {
        let signer = RsaSigner::new(digest);
        let signature = signer.sign(&key, b"payload").unwrap();
        assert!(signer.verify(&public, b"payload", &signature));
        assert!(!signer.verify(&public, b"payloaD", &signature));
    }
}

#[test]
fn test_digest_mismatch_fails() {
    let signature = RsaSigner::new(RsaDigest::Sha256)
        .sign(&rsa_private_key(), b"payload")
        .unwrap();
    assert!(!RsaSigner::new(RsaDigest::Sha512).verify(&rsa_public_key(), b"payload", &signature));
}

#[test]
fn test_malformed_private_key_is_signing_error() {
    assert!(matches!(
        RsaPrivateKey::from_pkcs8_der(b"not a key"),
        Err(TokenError::Signing(_))
    ));
    // A public key is not a private key.
    assert!(matches!(
        RsaPrivateKey::from_pkcs1_der(RSA_PUBLIC_PKCS1_DER),
        Err(TokenError::Signing(_))
    ));
}

#[test]
fn test_malformed_public_key_returns_false() {
    let signature = RsaSigner::new(RsaDigest::Sha256)
        .sign(&rsa_private_key(), b"payload")
        .unwrap();
    let garbage = RsaPublicKey::from_pkcs1_der(b"garbage".to_vec());
    assert!(!RsaSigner::new(RsaDigest::Sha256).verify(&garbage, b"payload", &signature));
}

#[test]
fn test_components_from_jwk() {
    // Modulus and exponent as published in a JWKS document.
    let jwk_n = codec::encode(modulus_from_der(RSA_PUBLIC_PKCS1_DER));
    let jwk_e = "AQAB";
    let public = RsaPublicKey::from_components(
        codec::decode(&jwk_n).unwrap(),
        codec::decode(jwk_e).unwrap(),
    );

    let signature = RsaSigner::new(RsaDigest::Sha256)
        .sign(&rsa_private_key(), b"payload")
        .unwrap();
    assert!(RsaSigner::new(RsaDigest::Sha256).verify(&public, b"payload", &signature));
}

#[test]
fn test_rs256_token_round_trip() {
    let header = Header::new(Algorithm::RS256).with_key_id("rsa-1");
    let payload = Payload::new()
        .with_issuer("issuer")
        .with_subject("alice")
        .with_issued_at(0)
        .with_expiration(3600);

    let token = TokenCodec::sign(&SigningKey::Rsa(rsa_private_key()), &header, &payload).unwrap();
    let (decoded_header, decoded_payload) =
        TokenCodec::verify(&VerificationKey::Rsa(rsa_public_key()), &token).unwrap();

    assert_eq!(decoded_header, header);
    assert_eq!(decoded_payload, payload);
}

#[test]
fn test_hs256_with_public_key_bytes_rejected() {
    // Classic algorithm confusion: sign HS256 using the public key bytes as
    // the MAC secret. An RSA verification key must not accept it.
    let header = Header::new(Algorithm::HS256);
    let payload = Payload::new().with_subject("mallory");
    let forged_key = MacKey::new(RSA_PUBLIC_PKCS1_DER.to_vec()).unwrap();
    let token = TokenCodec::sign(&SigningKey::Mac(forged_key), &header, &payload).unwrap();

    assert!(matches!(
        TokenCodec::verify(&VerificationKey::Rsa(rsa_public_key()), &token),
        Err(TokenError::InvalidSignature)
    ));
}

/// Pull the modulus out of a PKCS#1 `RSAPublicKey` (SEQUENCE { n, e }).
fn modulus_from_der(der: &[u8]) -> Vec<u8> {
    fn read_len(bytes: &[u8], pos: &mut usize) -> usize {
        let first = bytes[*pos];
        *pos += 1;
        if first & 0x80 == 0 {
            return first as usize;
        }
        let count = (first & 0x7f) as usize;
        let mut len = 0usize;
        for _ in 0..count {
            len = (len << 8) | bytes[*pos] as usize;
            *pos += 1;
        }
        len
    }

    let mut pos = 1; // SEQUENCE tag
    read_len(der, &mut pos);
    assert_eq!(der[pos], 0x02, "expected INTEGER");
    pos += 1;
    let len = read_len(der, &mut pos);
    let mut n = &der[pos..pos + len];
    // Strip the sign byte.
    while n.first() == Some(&0) {
        n = &n[1..];
    }
    n.to_vec()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_rsa_signature_byte_flip_rejected(
        message in prop::collection::vec(any::<u8>(), 0..256),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let signer = RsaSigner::new(RsaDigest::Sha256);
        let mut signature = signer.sign(&rsa_private_key(), &message).unwrap();
        prop_assert!(signer.verify(&rsa_public_key(), &message, &signature));

        let i = index.index(signature.len());
        signature[i] ^= flip;
        prop_assert!(!signer.verify(&rsa_public_key(), &message, &signature));
    }
}
