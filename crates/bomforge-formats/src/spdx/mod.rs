//! SPDX format handlers, one module per version family.

mod v2_3;
mod v3_0;

pub use v2_3::Spdx23Handler;
pub use v3_0::Spdx3Handler;

use crate::error::FormatError;
use crate::FormatHandler;

/// Resolve an SPDX version string to its handler. Accepts both `"2.3"` and `"SPDX-2.3"`.
pub fn resolve(version: &str) -> Result<Box<dyn FormatHandler>, FormatError> {
    let v = version.trim_start_matches("SPDX-");
    match v {
        "2.3" => Ok(Box::new(Spdx23Handler)),
        "3.0.0" => Ok(Box::new(Spdx3Handler { version: "3.0.0", supports_annotations: false })),
        "3.0.1" => Ok(Box::new(Spdx3Handler { version: "3.0.1", supports_annotations: true })),
        "3.0" => Ok(Box::new(Spdx3Handler { version: "3.0.0", supports_annotations: false })),
        other => Err(FormatError::UnsupportedVersion {
            format: "SPDX".to_owned(),
            version: other.to_owned(),
        }),
    }
}
