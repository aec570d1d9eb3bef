//! `bomforge verify` -- verify an embedded CycloneDX SBOM signature.

use serde::Serialize;

use bomforge_core::SignatureAlgorithm;
use bomforge_signer::Signer;

use crate::cli::VerifyArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

#[derive(Debug, Serialize)]
struct VerifyResult {
    valid: bool,
}

impl Render for VerifyResult {
    fn render_text(&self, w: &mut dyn std::io::Write) -> std::io::Result<()> {
        writeln!(w, "{}", if self.valid { "valid signature" } else { "INVALID signature" })
    }
}

fn signer_error(signer: &Signer, action: &str) -> CliError {
    CliError::Command(format!(
        "{action}: {}",
        signer.last_error().unwrap_or("unknown error")
    ))
}

pub async fn execute(args: VerifyArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let algorithm = SignatureAlgorithm::parse(&args.algorithm)
        .ok_or_else(|| CliError::Command(format!("unsupported signature algorithm: {}", args.algorithm)))?;

    let document = std::fs::read_to_string(&args.path)?;

    let mut signer = Signer::new();
    match (&args.public_key, &args.certificate) {
        (Some(key_path), _) => {
            let key_path = key_path.to_string_lossy();
            if !signer.load_public_key_file(&key_path, algorithm) {
                return Err(signer_error(&signer, "failed to load public key"));
            }
        }
        (None, Some(cert_path)) => {
            let cert_path = cert_path.to_string_lossy();
            if !signer.load_certificate_file(&cert_path) {
                return Err(signer_error(&signer, "failed to load certificate"));
            }
            if !signer.use_certificate_public_key(algorithm) {
                return Err(signer_error(&signer, "failed to derive public key from certificate"));
            }
        }
        (None, None) => {
            return Err(CliError::Command(
                "verify requires either --public-key or --certificate".to_owned(),
            ));
        }
    }

    let valid = signer.verify(&document);
    writer.render(&VerifyResult { valid })?;

    if valid {
        Ok(())
    } else {
        Err(CliError::VerificationFailed)
    }
}
