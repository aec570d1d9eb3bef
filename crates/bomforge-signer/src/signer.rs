//! The [`Signer`] state machine: load keys/certificates, sign a CycloneDX
//! document, embed the signature, extract it back out, and verify it.
//!
//! State machine (see the concurrency model notes): `Empty -> HasPrivateKey ->
//! (optional) HasCertificate -> SignedOnce` (repeatable), and orthogonally
//! `Empty -> HasPublicKey -> VerifiedOrRejected`. Every fallible operation here
//! returns a bool or `Option`, never propagates an exception; callers inspect
//! [`Signer::last_error`] for detail, and the signer remains usable afterward.

use base64::Engine;
use serde_json::Value;

use bomforge_core::{JwkPublicKey, Signature, SignatureAlgorithm};

use crate::crypto;
use crate::error::SignerError;
use crate::key::{self, PrivateKey, PublicKey};

fn b64url_encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn b64url_decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(s)
}

fn current_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Set `signature` at the document root to `signature`, re-serialized pretty-printed.
pub fn embed(document: &str, signature: &Signature) -> Result<String, SignerError> {
    let mut value: Value = serde_json::from_str(document)?;
    let sig_value = serde_json::to_value(signature)?;
    match &mut value {
        Value::Object(map) => {
            map.insert("signature".to_owned(), sig_value);
        }
        _ => return Err(SignerError::NotAnObject),
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Read the root `signature` field back out of an embedded document.
pub fn extract(document: &str) -> Result<Signature, SignerError> {
    let value: Value = serde_json::from_str(document)?;
    let sig_value = value.get("signature").ok_or(SignerError::NoSignature)?;
    Ok(serde_json::from_value(sig_value.clone())?)
}

/// Loads PEM key material and performs sign/verify against CycloneDX documents.
/// Not safe to share across threads; calls on one instance must be serialized.
#[derive(Default)]
pub struct Signer {
    private_key: Option<(PrivateKey, SignatureAlgorithm)>,
    certificate_pem: Option<String>,
    public_key: Option<(PublicKey, SignatureAlgorithm)>,
    last_error: Option<String>,
}

impl Signer {
    pub fn new() -> Self {
        Signer::default()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn has_certificate(&self) -> bool {
        self.certificate_pem.is_some()
    }

    pub fn has_public_key(&self) -> bool {
        self.public_key.is_some()
    }

    fn fail(&mut self, msg: impl Into<String>) -> bool {
        let msg = msg.into();
        tracing::warn!(error = %msg, "signer operation failed");
        self.last_error = Some(msg);
        false
    }

    /// Load a PEM private key from disk. On failure, sets `last_error` to
    /// "Failed to open private key file" (I/O) or the parse failure message.
    pub fn load_private_key_file(
        &mut self,
        path: &str,
        algorithm: SignatureAlgorithm,
        password: Option<&str>,
    ) -> bool {
        let pem = match std::fs::read_to_string(path) {
            Ok(p) => p,
            Err(e) => return self.fail(SignerError::PrivateKeyFileOpen(e).to_string()),
        };
        self.load_private_key_pem(&pem, algorithm, password)
    }

    pub fn load_private_key_pem(
        &mut self,
        pem: &str,
        algorithm: SignatureAlgorithm,
        password: Option<&str>,
    ) -> bool {
        match key::load_private_key(pem, algorithm, password) {
            Ok(k) => {
                self.private_key = Some((k, algorithm));
                self.last_error = None;
                true
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    pub fn load_certificate_file(&mut self, path: &str) -> bool {
        let pem = match std::fs::read_to_string(path) {
            Ok(p) => p,
            Err(e) => return self.fail(SignerError::CertificateFileOpen(e).to_string()),
        };
        self.load_certificate_pem(&pem)
    }

    pub fn load_certificate_pem(&mut self, pem: &str) -> bool {
        if x509_parser::pem::parse_x509_pem(pem.as_bytes()).is_err() {
            return self.fail(SignerError::CertificateParse.to_string());
        }
        self.certificate_pem = Some(pem.to_owned());
        self.last_error = None;
        true
    }

    /// Derive a public key from the already-loaded certificate, for `verify()`.
    pub fn use_certificate_public_key(&mut self, algorithm: SignatureAlgorithm) -> bool {
        let cert = match self.certificate_pem.clone() {
            Some(c) => c,
            None => return self.fail("No certificate loaded"),
        };
        match key::public_key_from_certificate(&cert, algorithm) {
            Ok(k) => {
                self.public_key = Some((k, algorithm));
                self.last_error = None;
                true
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    pub fn load_public_key_file(&mut self, path: &str, algorithm: SignatureAlgorithm) -> bool {
        let pem = match std::fs::read_to_string(path) {
            Ok(p) => p,
            Err(_) => return self.fail("Failed to open public key file"),
        };
        self.load_public_key_pem(&pem, algorithm)
    }

    pub fn load_public_key_pem(&mut self, pem: &str, algorithm: SignatureAlgorithm) -> bool {
        match key::load_public_key(pem, algorithm) {
            Ok(k) => {
                self.public_key = Some((k, algorithm));
                self.last_error = None;
                true
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Sign `sbom_content` (raw CycloneDX JSON text) over its canonical form with
    /// all `signature` fields excluded. Returns `None` and sets `last_error` when
    /// no private key is loaded, the content is malformed, or signing fails.
    pub fn sign(&mut self, sbom_content: &str) -> Option<Signature> {
        let (key, algorithm) = match &self.private_key {
            Some((k, a)) => (k, *a),
            None => {
                self.fail(SignerError::NoPrivateKey.to_string());
                return None;
            }
        };

        let value: Value = match serde_json::from_str(sbom_content) {
            Ok(v) => v,
            Err(e) => {
                self.fail(SignerError::InvalidJson(e).to_string());
                return None;
            }
        };

        let (canonical, _excludes) = bomforge_canon::canonicalize(&value);

        let sig_bytes = match crypto::sign_bytes(key, algorithm, canonical.as_bytes()) {
            Ok(b) => b,
            Err(e) => {
                self.fail(e.to_string());
                return None;
            }
        };

        let public_key: Option<JwkPublicKey> = Some(key::public_key_jwk(key));
        let certificate = self.certificate_pem.clone();

        self.last_error = None;
        Some(Signature {
            algorithm: algorithm.as_str().to_owned(),
            value: b64url_encode(&sig_bytes),
            public_key,
            key_id: None,
            certificate,
            timestamp: Some(current_timestamp()),
        })
    }

    /// Extract the embedded signature, recompute the canonical bytes with all
    /// `signature` fields (root and nested) excluded, and verify against the
    /// loaded public key. Returns `false` and sets `last_error` on any failure,
    /// including a genuine signature mismatch.
    pub fn verify(&mut self, document: &str) -> bool {
        let sig = match extract(document) {
            Ok(s) => s,
            Err(e) => return self.fail(e.to_string()),
        };

        let algorithm = match SignatureAlgorithm::parse(&sig.algorithm) {
            Some(a) => a,
            None => return self.fail(format!("unsupported signature algorithm: {}", sig.algorithm)),
        };

        let (key, key_algorithm) = match &self.public_key {
            Some((k, a)) => (k, *a),
            None => return self.fail(SignerError::NoPublicKey.to_string()),
        };

        if key_algorithm != algorithm {
            return self.fail(format!(
                "signature algorithm {} does not match loaded public key algorithm {}",
                sig.algorithm,
                key_algorithm.as_str()
            ));
        }

        let value: Value = match serde_json::from_str(document) {
            Ok(v) => v,
            Err(e) => return self.fail(SignerError::InvalidJson(e).to_string()),
        };
        let (canonical, _excludes) = bomforge_canon::canonicalize(&value);

        let sig_bytes = match b64url_decode(&sig.value) {
            Ok(b) => b,
            Err(e) => return self.fail(SignerError::InvalidSignatureEncoding(e.to_string()).to_string()),
        };

        match crypto::verify_bytes(key, algorithm, canonical.as_bytes(), &sig_bytes) {
            Ok(true) => {
                self.last_error = None;
                true
            }
            Ok(false) => self.fail("signature verification failed"),
            Err(e) => self.fail(e.to_string()),
        }
    }
}
