//! The [`Component`] entity — one software artifact discovered during linking.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::CoreError;

/// Broad classification of a component's file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Executable,
    SharedLibrary,
    StaticLibrary,
    Object,
    Source,
    Unknown,
}

impl Default for FileType {
    fn default() -> Self {
        FileType::Unknown
    }
}

/// Scope of a component within the dependency graph, as emitted in SPDX/CycloneDX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Required,
    Optional,
    Excluded,
}

impl Default for Scope {
    fn default() -> Self {
        Scope::Required
    }
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Required => "required",
            Scope::Optional => "optional",
            Scope::Excluded => "excluded",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "" | "required" => Ok(Scope::Required),
            "optional" => Ok(Scope::Optional),
            "excluded" => Ok(Scope::Excluded),
            other => Err(CoreError::InvalidScope(other.to_owned())),
        }
    }
}

/// One software artifact: an object file, a library, an executable, or an unresolved
/// dependency discovered while walking a link graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub file_path: String,
    #[serde(default)]
    pub file_type: FileType,

    #[serde(default)]
    pub package_manager: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub group: String,

    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub copyright: String,

    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub cpe: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub download_location: String,

    /// Lowercase hex checksum. Callers are responsible for matching it to an algorithm
    /// (length 64 implies SHA-256, 40 implies SHA-1).
    #[serde(default)]
    pub checksum: String,

    /// Identifiers of other components this one depends on, in discovery order.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Free-form extensibility properties, e.g. `external:website` -> url.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Component {
    /// Construct a component with the minimum required fields, defaulting everything else.
    pub fn new(name: impl Into<String>, file_path: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::EmptyComponentName);
        }
        Ok(Component {
            name,
            version: String::new(),
            file_path: file_path.into(),
            file_type: FileType::Unknown,
            package_manager: String::new(),
            supplier: String::new(),
            manufacturer: String::new(),
            publisher: String::new(),
            group: String::new(),
            license: String::new(),
            copyright: String::new(),
            description: String::new(),
            scope: Scope::Required,
            mime_type: String::new(),
            cpe: String::new(),
            homepage: String::new(),
            download_location: String::new(),
            checksum: String::new(),
            dependencies: Vec::new(),
            properties: BTreeMap::new(),
        })
    }

    /// `name + "-" + version`, or just `name` when the version is empty or "UNKNOWN".
    pub fn bom_ref(&self) -> String {
        if self.version.is_empty() || self.version == "UNKNOWN" {
            self.name.clone()
        } else {
            format!("{}-{}", self.name, self.version)
        }
    }

    /// A package URL of the form `pkg:<manager>/<name>@<version>`.
    pub fn purl(&self) -> String {
        let manager = if self.package_manager.is_empty() {
            "generic"
        } else {
            self.package_manager.as_str()
        };
        if self.version.is_empty() {
            format!("pkg:{manager}/{}", self.name)
        } else {
            format!("pkg:{manager}/{}@{}", self.name, self.version)
        }
    }

    /// Identity hash used for equality and comparator keying: `name:version:type:purl`.
    pub fn hash(&self) -> String {
        format!(
            "{}:{}:{:?}:{}",
            self.name,
            self.version,
            self.file_type,
            self.purl()
        )
    }

    /// True when `checksum` is a well-formed SHA-256 digest (64 lowercase hex chars).
    pub fn has_sha256(&self) -> bool {
        self.checksum.len() == 64 && self.checksum.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// True when `checksum` is a well-formed SHA-1 digest (40 lowercase hex chars).
    pub fn has_sha1(&self) -> bool {
        self.checksum.len() == 40 && self.checksum.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.hash() == other.hash()
    }
}

impl Eq for Component {}
