//! Raw signature computation and verification over message bytes, dispatched
//! per algorithm family. Callers working with SBOM documents should go through
//! [`crate::signer::Signer`] rather than these primitives directly.

use sha2::{Sha256, Sha384, Sha512};
use signature::{SignatureEncoding, Signer as _, Verifier as _};

use bomforge_core::SignatureAlgorithm;

use crate::error::SignerError;
use crate::key::{PrivateKey, PublicKey};

/// Sign `message` with `key` under `algorithm`. The key variant and algorithm must
/// agree on family (RSA key + `RSxxx`, EC key + matching curve, Ed25519 + Ed25519);
/// a mismatch is a configuration error, not a crypto failure.
pub fn sign_bytes(key: &PrivateKey, algorithm: SignatureAlgorithm, message: &[u8]) -> Result<Vec<u8>, SignerError> {
    match (key, algorithm) {
        (PrivateKey::Rsa(k), SignatureAlgorithm::Rs256) => {
            let signing_key = rsa::pkcs1v15::SigningKey::<Sha256>::new(k.clone());
            let sig = signing_key
                .try_sign(message)
                .map_err(|e| SignerError::SignFailed(e.to_string()))?;
            Ok(sig.to_bytes().to_vec())
        }
        (PrivateKey::Rsa(k), SignatureAlgorithm::Rs384) => {
            let signing_key = rsa::pkcs1v15::SigningKey::<Sha384>::new(k.clone());
            let sig = signing_key
                .try_sign(message)
                .map_err(|e| SignerError::SignFailed(e.to_string()))?;
            Ok(sig.to_bytes().to_vec())
        }
        (PrivateKey::Rsa(k), SignatureAlgorithm::Rs512) => {
            let signing_key = rsa::pkcs1v15::SigningKey::<Sha512>::new(k.clone());
            let sig = signing_key
                .try_sign(message)
                .map_err(|e| SignerError::SignFailed(e.to_string()))?;
            Ok(sig.to_bytes().to_vec())
        }
        (PrivateKey::EcP256(k), SignatureAlgorithm::Es256) => {
            let sig: p256::ecdsa::Signature = k
                .try_sign(message)
                .map_err(|e| SignerError::SignFailed(e.to_string()))?;
            Ok(sig.to_bytes().to_vec())
        }
        (PrivateKey::EcP384(k), SignatureAlgorithm::Es384) => {
            let sig: p384::ecdsa::Signature = k
                .try_sign(message)
                .map_err(|e| SignerError::SignFailed(e.to_string()))?;
            Ok(sig.to_bytes().to_vec())
        }
        (PrivateKey::Ed25519(k), SignatureAlgorithm::Ed25519) => {
            let sig = k.sign(message);
            Ok(sig.to_bytes().to_vec())
        }
        (_, algorithm) => Err(SignerError::UnsupportedAlgorithm(format!(
            "loaded key does not match algorithm {}",
            algorithm.as_str()
        ))),
    }
}

/// Verify `signature_bytes` over `message` against `key` under `algorithm`.
pub fn verify_bytes(
    key: &PublicKey,
    algorithm: SignatureAlgorithm,
    message: &[u8],
    signature_bytes: &[u8],
) -> Result<bool, SignerError> {
    match (key, algorithm) {
        (PublicKey::Rsa(k), SignatureAlgorithm::Rs256) => {
            let verifying_key = rsa::pkcs1v15::VerifyingKey::<Sha256>::new(k.clone());
            let sig = rsa::pkcs1v15::Signature::try_from(signature_bytes)
                .map_err(|e| SignerError::InvalidSignatureEncoding(e.to_string()))?;
            Ok(verifying_key.verify(message, &sig).is_ok())
        }
        (PublicKey::Rsa(k), SignatureAlgorithm::Rs384) => {
            let verifying_key = rsa::pkcs1v15::VerifyingKey::<Sha384>::new(k.clone());
            let sig = rsa::pkcs1v15::Signature::try_from(signature_bytes)
                .map_err(|e| SignerError::InvalidSignatureEncoding(e.to_string()))?;
            Ok(verifying_key.verify(message, &sig).is_ok())
        }
        (PublicKey::Rsa(k), SignatureAlgorithm::Rs512) => {
            let verifying_key = rsa::pkcs1v15::VerifyingKey::<Sha512>::new(k.clone());
            let sig = rsa::pkcs1v15::Signature::try_from(signature_bytes)
                .map_err(|e| SignerError::InvalidSignatureEncoding(e.to_string()))?;
            Ok(verifying_key.verify(message, &sig).is_ok())
        }
        (PublicKey::EcP256(k), SignatureAlgorithm::Es256) => {
            let sig = p256::ecdsa::Signature::from_slice(signature_bytes)
                .map_err(|e| SignerError::InvalidSignatureEncoding(e.to_string()))?;
            Ok(k.verify(message, &sig).is_ok())
        }
        (PublicKey::EcP384(k), SignatureAlgorithm::Es384) => {
            let sig = p384::ecdsa::Signature::from_slice(signature_bytes)
                .map_err(|e| SignerError::InvalidSignatureEncoding(e.to_string()))?;
            Ok(k.verify(message, &sig).is_ok())
        }
        (PublicKey::Ed25519(k), SignatureAlgorithm::Ed25519) => {
            let sig = ed25519_dalek::Signature::from_slice(signature_bytes)
                .map_err(|e| SignerError::InvalidSignatureEncoding(e.to_string()))?;
            Ok(k.verify(message, &sig).is_ok())
        }
        (_, algorithm) => Err(SignerError::UnsupportedAlgorithm(format!(
            "loaded key does not match algorithm {}",
            algorithm.as_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{load_private_key, public_key_from_private};

    #[test]
    fn ed25519_sign_and_verify_round_trips() {
        let signing_key = ed25519_dalek::SigningKey::generate(&mut rand_core::OsRng);
        let private = PrivateKey::Ed25519(signing_key);
        let public = public_key_from_private(&private);

        let sig = sign_bytes(&private, SignatureAlgorithm::Ed25519, b"hello").unwrap();
        assert!(verify_bytes(&public, SignatureAlgorithm::Ed25519, b"hello", &sig).unwrap());
        assert!(!verify_bytes(&public, SignatureAlgorithm::Ed25519, b"tampered", &sig).unwrap());
    }

    #[test]
    fn algorithm_key_mismatch_is_an_error() {
        let signing_key = ed25519_dalek::SigningKey::generate(&mut rand_core::OsRng);
        let private = PrivateKey::Ed25519(signing_key);
        assert!(sign_bytes(&private, SignatureAlgorithm::Rs256, b"hello").is_err());
    }

    #[test]
    fn loading_unrelated_private_key_does_not_panic_on_unsupported_pairing() {
        let err = load_private_key("not a pem", SignatureAlgorithm::Rs256, None).unwrap_err();
        assert!(matches!(err, SignerError::PrivateKeyParse));
    }
}
