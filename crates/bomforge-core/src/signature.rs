//! The [`Signature`] object embedded in signed CycloneDX documents (see the signer crate).

use serde::{Deserialize, Serialize};

/// Supported JSF signature algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    Rs256,
    Rs384,
    Rs512,
    Es256,
    Es384,
    Es512,
    Ed25519,
}

impl SignatureAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Rs256 => "RS256",
            SignatureAlgorithm::Rs384 => "RS384",
            SignatureAlgorithm::Rs512 => "RS512",
            SignatureAlgorithm::Es256 => "ES256",
            SignatureAlgorithm::Es384 => "ES384",
            SignatureAlgorithm::Es512 => "ES512",
            SignatureAlgorithm::Ed25519 => "Ed25519",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RS256" => Some(SignatureAlgorithm::Rs256),
            "RS384" => Some(SignatureAlgorithm::Rs384),
            "RS512" => Some(SignatureAlgorithm::Rs512),
            "ES256" => Some(SignatureAlgorithm::Es256),
            "ES384" => Some(SignatureAlgorithm::Es384),
            "ES512" => Some(SignatureAlgorithm::Es512),
            "Ed25519" => Some(SignatureAlgorithm::Ed25519),
            _ => None,
        }
    }

    pub fn is_rsa(&self) -> bool {
        matches!(
            self,
            SignatureAlgorithm::Rs256 | SignatureAlgorithm::Rs384 | SignatureAlgorithm::Rs512
        )
    }

    pub fn is_ecdsa(&self) -> bool {
        matches!(
            self,
            SignatureAlgorithm::Es256 | SignatureAlgorithm::Es384 | SignatureAlgorithm::Es512
        )
    }
}

/// JWK-style public key descriptor, populated per RFC 7518 for the algorithm family in use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwkPublicKey {
    pub kty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

/// A JSF-compliant signature object: algorithm, base64url value, and optional public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    pub algorithm: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "publicKey")]
    pub public_key: Option<JwkPublicKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "keyId")]
    pub key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_round_trips_through_str() {
        for alg in [
            SignatureAlgorithm::Rs256,
            SignatureAlgorithm::Rs384,
            SignatureAlgorithm::Rs512,
            SignatureAlgorithm::Es256,
            SignatureAlgorithm::Es384,
            SignatureAlgorithm::Es512,
            SignatureAlgorithm::Ed25519,
        ] {
            assert_eq!(SignatureAlgorithm::parse(alg.as_str()), Some(alg));
        }
    }

    #[test]
    fn classifies_rsa_and_ecdsa() {
        assert!(SignatureAlgorithm::Rs256.is_rsa());
        assert!(!SignatureAlgorithm::Rs256.is_ecdsa());
        assert!(SignatureAlgorithm::Es256.is_ecdsa());
        assert!(!SignatureAlgorithm::Ed25519.is_rsa());
    }

    #[test]
    fn signature_serializes_without_none_fields() {
        let sig = Signature {
            algorithm: "RS256".to_owned(),
            value: "abc".to_owned(),
            public_key: None,
            key_id: None,
            certificate: None,
            timestamp: None,
        };
        let json = serde_json::to_string(&sig).unwrap();
        assert!(!json.contains("publicKey"));
        assert!(!json.contains("keyId"));
    }
}
