//! `bomforge sign` -- sign a CycloneDX SBOM and embed the signature.

use serde::Serialize;

use bomforge_core::SignatureAlgorithm;
use bomforge_signer::{embed, Signer};

use crate::cli::SignArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

#[derive(Debug, Serialize)]
struct SignResult {
    algorithm: String,
    output_path: String,
}

impl Render for SignResult {
    fn render_text(&self, w: &mut dyn std::io::Write) -> std::io::Result<()> {
        writeln!(w, "Signed with {} -> {}", self.algorithm, self.output_path)
    }
}

fn signer_error(signer: &Signer, action: &str) -> CliError {
    CliError::Command(format!(
        "{action}: {}",
        signer.last_error().unwrap_or("unknown error")
    ))
}

pub async fn execute(args: SignArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let algorithm = SignatureAlgorithm::parse(&args.algorithm)
        .ok_or_else(|| CliError::Command(format!("unsupported signature algorithm: {}", args.algorithm)))?;

    let document = std::fs::read_to_string(&args.path)?;

    let mut signer = Signer::new();
    let key_path = args.private_key.to_string_lossy();
    if !signer.load_private_key_file(&key_path, algorithm, args.password.as_deref()) {
        return Err(signer_error(&signer, "failed to load private key"));
    }

    if let Some(cert_path) = &args.certificate {
        let cert_path = cert_path.to_string_lossy();
        if !signer.load_certificate_file(&cert_path) {
            return Err(signer_error(&signer, "failed to load certificate"));
        }
    }

    let signature = signer
        .sign(&document)
        .ok_or_else(|| signer_error(&signer, "failed to sign document"))?;

    let signed = embed(&document, &signature)?;
    let output_path = args.output_path.to_string_lossy().into_owned();
    std::fs::write(&output_path, signed)?;

    writer.render(&SignResult {
        algorithm: args.algorithm,
        output_path,
    })
}
