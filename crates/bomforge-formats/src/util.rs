//! Shared helpers used across format handlers: checksum naming, timestamps, identifiers.

use chrono::Utc;

/// Current UTC time as ISO 8601 with millisecond precision and a trailing `Z`,
/// e.g. `2026-07-31T12:34:56.789Z`.
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Maps a component's checksum to `(algorithm_name, hex_value)` for the given format family.
/// SPDX names algorithms without hyphens (`SHA256`); CycloneDX keeps the hyphen (`SHA-256`).
pub fn checksum_algorithm_name(checksum: &str, spdx_style: bool) -> Option<&'static str> {
    match checksum.len() {
        64 if checksum.chars().all(|c| c.is_ascii_hexdigit()) => {
            Some(if spdx_style { "SHA256" } else { "SHA-256" })
        }
        40 if checksum.chars().all(|c| c.is_ascii_hexdigit()) => {
            Some(if spdx_style { "SHA1" } else { "SHA-1" })
        }
        _ => None,
    }
}

/// Sanitize `name` into a `SPDXRef-<id>` token matching `^SPDXRef-[A-Za-z0-9_-]+$`.
pub fn spdx_id(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    format!("SPDXRef-{sanitized}")
}

/// A random urn:uuid serial number, as CycloneDX 1.5/1.6 require.
pub fn urn_uuid() -> String {
    format!("urn:uuid:{}", uuid::Uuid::new_v4())
}
