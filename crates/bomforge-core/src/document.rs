//! The [`SbomDocument`] envelope around a set of components.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::component::Component;
use crate::signature::Signature;

/// Which SBOM family a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SbomFormat {
    Spdx,
    CycloneDx,
}

impl SbomFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SbomFormat::Spdx => "spdx",
            SbomFormat::CycloneDx => "cyclonedx",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "spdx" => Some(SbomFormat::Spdx),
            "cyclonedx" | "cyclone" => Some(SbomFormat::CycloneDx),
            _ => None,
        }
    }
}

/// Document-level metadata independent of the concrete emitted format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub created: String,
    pub creator_tool: String,
    pub document_name: String,
    pub document_namespace: String,
    pub serial_number: String,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

/// An ordered envelope around a set of [`Component`]s plus document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbomDocument {
    pub format: SbomFormat,
    pub version: String,
    pub metadata: DocumentMetadata,
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
}

impl SbomDocument {
    pub fn new(format: SbomFormat, version: impl Into<String>) -> Self {
        SbomDocument {
            format,
            version: version.into(),
            metadata: DocumentMetadata::default(),
            components: Vec::new(),
            signature: None,
        }
    }

    /// Components sorted by `bom_ref`, for deterministic emission (required for reproducible
    /// signatures, see the concurrency model notes).
    pub fn components_sorted(&self) -> Vec<&Component> {
        let mut refs: Vec<&Component> = self.components.iter().collect();
        refs.sort_by(|a, b| a.bom_ref().cmp(&b.bom_ref()));
        refs
    }
}
