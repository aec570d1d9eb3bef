//! CycloneDX format handlers.

mod handler;

pub use handler::CycloneDxHandler;

use crate::error::FormatError;
use crate::FormatHandler;

pub fn resolve(version: &str) -> Result<Box<dyn FormatHandler>, FormatError> {
    match version {
        "1.4" => Ok(Box::new(CycloneDxHandler {
            version: "1.4",
            has_serial_number: false,
            compact: false,
        })),
        "1.5" => Ok(Box::new(CycloneDxHandler {
            version: "1.5",
            has_serial_number: true,
            compact: true,
        })),
        "1.6" => Ok(Box::new(CycloneDxHandler {
            version: "1.6",
            has_serial_number: true,
            compact: true,
        })),
        other => Err(FormatError::UnsupportedVersion {
            format: "CycloneDX".to_owned(),
            version: other.to_owned(),
        }),
    }
}
