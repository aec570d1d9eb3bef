//! PEM key/certificate loading for every supported JSF algorithm family.

use bomforge_core::{JwkPublicKey, SignatureAlgorithm};
use pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::traits::PublicKeyParts;

use crate::error::SignerError;

#[derive(Debug)]
pub enum PrivateKey {
    Rsa(rsa::RsaPrivateKey),
    EcP256(p256::ecdsa::SigningKey),
    EcP384(p384::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
}

pub enum PublicKey {
    Rsa(rsa::RsaPublicKey),
    EcP256(p256::ecdsa::VerifyingKey),
    EcP384(p384::ecdsa::VerifyingKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

/// Load a PEM private key for the given algorithm family. Supports unencrypted
/// PKCS#1 (RSA only), PKCS#8, and SEC1 (EC only) containers. Encrypted PKCS#8
/// containers are decrypted with `password` when supplied.
pub fn load_private_key(
    pem_str: &str,
    algorithm: SignatureAlgorithm,
    password: Option<&str>,
) -> Result<PrivateKey, SignerError> {
    if let Some(password) = password {
        return load_encrypted_private_key(pem_str, algorithm, password);
    }

    match algorithm {
        SignatureAlgorithm::Rs256 | SignatureAlgorithm::Rs384 | SignatureAlgorithm::Rs512 => {
            rsa::RsaPrivateKey::from_pkcs8_pem(pem_str)
                .or_else(|_| rsa::RsaPrivateKey::from_pkcs1_pem(pem_str))
                .map(PrivateKey::Rsa)
                .map_err(|_| SignerError::PrivateKeyParse)
        }
        SignatureAlgorithm::Es256 => p256::ecdsa::SigningKey::from_pkcs8_pem(pem_str)
            .or_else(|_| p256::SecretKey::from_sec1_pem(pem_str).map(Into::into))
            .map(PrivateKey::EcP256)
            .map_err(|_| SignerError::PrivateKeyParse),
        SignatureAlgorithm::Es384 => p384::ecdsa::SigningKey::from_pkcs8_pem(pem_str)
            .or_else(|_| p384::SecretKey::from_sec1_pem(pem_str).map(Into::into))
            .map(PrivateKey::EcP384)
            .map_err(|_| SignerError::PrivateKeyParse),
        SignatureAlgorithm::Es512 => Err(SignerError::UnsupportedAlgorithm(
            "ES512 (P-521) is not implemented by the available elliptic curve stack".to_owned(),
        )),
        SignatureAlgorithm::Ed25519 => ed25519_dalek::SigningKey::from_pkcs8_pem(pem_str)
            .map(PrivateKey::Ed25519)
            .map_err(|_| SignerError::PrivateKeyParse),
    }
}

fn load_encrypted_private_key(
    pem_str: &str,
    algorithm: SignatureAlgorithm,
    password: &str,
) -> Result<PrivateKey, SignerError> {
    match algorithm {
        SignatureAlgorithm::Rs256 | SignatureAlgorithm::Rs384 | SignatureAlgorithm::Rs512 => {
            rsa::RsaPrivateKey::from_pkcs8_encrypted_pem(pem_str, password)
                .map(PrivateKey::Rsa)
                .map_err(|_| SignerError::PrivateKeyParse)
        }
        SignatureAlgorithm::Es256 => p256::ecdsa::SigningKey::from_pkcs8_encrypted_pem(pem_str, password)
            .map(PrivateKey::EcP256)
            .map_err(|_| SignerError::PrivateKeyParse),
        SignatureAlgorithm::Es384 => p384::ecdsa::SigningKey::from_pkcs8_encrypted_pem(pem_str, password)
            .map(PrivateKey::EcP384)
            .map_err(|_| SignerError::PrivateKeyParse),
        SignatureAlgorithm::Es512 => Err(SignerError::UnsupportedAlgorithm(
            "ES512 (P-521) is not implemented by the available elliptic curve stack".to_owned(),
        )),
        SignatureAlgorithm::Ed25519 => ed25519_dalek::SigningKey::from_pkcs8_encrypted_pem(pem_str, password)
            .map(PrivateKey::Ed25519)
            .map_err(|_| SignerError::PrivateKeyParse),
    }
}

pub fn load_public_key(pem_str: &str, algorithm: SignatureAlgorithm) -> Result<PublicKey, SignerError> {
    match algorithm {
        SignatureAlgorithm::Rs256 | SignatureAlgorithm::Rs384 | SignatureAlgorithm::Rs512 => {
            rsa::RsaPublicKey::from_public_key_pem(pem_str)
                .map(PublicKey::Rsa)
                .map_err(|_| SignerError::PublicKeyParse)
        }
        SignatureAlgorithm::Es256 => p256::ecdsa::VerifyingKey::from_public_key_pem(pem_str)
            .map(PublicKey::EcP256)
            .map_err(|_| SignerError::PublicKeyParse),
        SignatureAlgorithm::Es384 => p384::ecdsa::VerifyingKey::from_public_key_pem(pem_str)
            .map(PublicKey::EcP384)
            .map_err(|_| SignerError::PublicKeyParse),
        SignatureAlgorithm::Es512 => Err(SignerError::UnsupportedAlgorithm(
            "ES512 (P-521) is not implemented by the available elliptic curve stack".to_owned(),
        )),
        SignatureAlgorithm::Ed25519 => ed25519_dalek::VerifyingKey::from_public_key_pem(pem_str)
            .map(PublicKey::Ed25519)
            .map_err(|_| SignerError::PublicKeyParse),
    }
}

/// Extract the SubjectPublicKeyInfo from a PEM X.509 certificate and decode it for
/// the given algorithm family, so `verify()` can be handed a certificate directly.
pub fn public_key_from_certificate(
    pem_str: &str,
    algorithm: SignatureAlgorithm,
) -> Result<PublicKey, SignerError> {
    let (_, pem) = x509_parser::pem::parse_x509_pem(pem_str.as_bytes())
        .map_err(|_| SignerError::CertificateParse)?;
    let cert = pem.parse_x509().map_err(|_| SignerError::CertificateParse)?;
    let spki_der = cert.public_key().raw;

    match algorithm {
        SignatureAlgorithm::Rs256 | SignatureAlgorithm::Rs384 | SignatureAlgorithm::Rs512 => {
            rsa::RsaPublicKey::from_pkcs1_der(spki_der)
                .map(PublicKey::Rsa)
                .map_err(|_| SignerError::CertificateParse)
        }
        SignatureAlgorithm::Es256 => p256::ecdsa::VerifyingKey::from_sec1_bytes(spki_der)
            .map(PublicKey::EcP256)
            .map_err(|_| SignerError::CertificateParse),
        SignatureAlgorithm::Es384 => p384::ecdsa::VerifyingKey::from_sec1_bytes(spki_der)
            .map(PublicKey::EcP384)
            .map_err(|_| SignerError::CertificateParse),
        SignatureAlgorithm::Es512 => Err(SignerError::UnsupportedAlgorithm(
            "ES512 (P-521) is not implemented by the available elliptic curve stack".to_owned(),
        )),
        SignatureAlgorithm::Ed25519 => ed25519_dalek::VerifyingKey::try_from(spki_der)
            .map(PublicKey::Ed25519)
            .map_err(|_| SignerError::CertificateParse),
    }
}

/// Derive the public half of a loaded private key, for verifying a signature
/// just produced by the same key pair without a separate key file.
pub fn public_key_from_private(key: &PrivateKey) -> PublicKey {
    match key {
        PrivateKey::Rsa(k) => PublicKey::Rsa(k.to_public_key()),
        PrivateKey::EcP256(k) => PublicKey::EcP256(*k.verifying_key()),
        PrivateKey::EcP384(k) => PublicKey::EcP384(*k.verifying_key()),
        PrivateKey::Ed25519(k) => PublicKey::Ed25519(k.verifying_key()),
    }
}

fn b64url(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Export the public half of `key` as an RFC 7518 JWK descriptor.
pub fn public_key_jwk(key: &PrivateKey) -> JwkPublicKey {
    match key {
        PrivateKey::Rsa(k) => {
            let public = k.to_public_key();
            JwkPublicKey {
                kty: "RSA".to_owned(),
                n: Some(b64url(&public.n().to_bytes_be())),
                e: Some(b64url(&public.e().to_bytes_be())),
                ..Default::default()
            }
        }
        PrivateKey::EcP256(k) => {
            let point = k.verifying_key().to_encoded_point(false);
            JwkPublicKey {
                kty: "EC".to_owned(),
                crv: Some("P-256".to_owned()),
                x: point.x().map(|v| b64url(v)),
                y: point.y().map(|v| b64url(v)),
                ..Default::default()
            }
        }
        PrivateKey::EcP384(k) => {
            let point = k.verifying_key().to_encoded_point(false);
            JwkPublicKey {
                kty: "EC".to_owned(),
                crv: Some("P-384".to_owned()),
                x: point.x().map(|v| b64url(v)),
                y: point.y().map(|v| b64url(v)),
                ..Default::default()
            }
        }
        PrivateKey::Ed25519(k) => JwkPublicKey {
            kty: "OKP".to_owned(),
            crv: Some("Ed25519".to_owned()),
            x: Some(b64url(k.verifying_key().as_bytes())),
            ..Default::default()
        },
    }
}
