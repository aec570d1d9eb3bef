//! Generator configuration: a plain struct with a `Default` impl and a
//! `validate()` step, paired with a chainable builder — the same shape used
//! throughout this codebase for configuring stateful subsystems.

use std::collections::BTreeMap;

use crate::error::GeneratorError;

const SPDX_VERSIONS: &[&str] = &["2.3", "3.0.0", "3.0.1"];
const CYCLONEDX_VERSIONS: &[&str] = &["1.4", "1.5", "1.6"];

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub format: String,
    pub spdx_version: String,
    pub cyclonedx_version: String,
    pub transitive_dependencies: bool,
    pub suppress_warnings: bool,
    pub metadata: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            format: "cyclonedx".to_owned(),
            spdx_version: "2.3".to_owned(),
            cyclonedx_version: "1.6".to_owned(),
            transitive_dependencies: true,
            suppress_warnings: false,
            metadata: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        match self.format.to_ascii_lowercase().as_str() {
            "spdx" => {
                if !SPDX_VERSIONS.contains(&self.spdx_version.as_str()) {
                    return Err(GeneratorError::InvalidConfig {
                        field: "spdx_version".to_owned(),
                        reason: format!(
                            "'{}' is not one of {SPDX_VERSIONS:?}",
                            self.spdx_version
                        ),
                    });
                }
            }
            "cyclonedx" | "cyclone" => {
                if !CYCLONEDX_VERSIONS.contains(&self.cyclonedx_version.as_str()) {
                    return Err(GeneratorError::InvalidConfig {
                        field: "cyclonedx_version".to_owned(),
                        reason: format!(
                            "'{}' is not one of {CYCLONEDX_VERSIONS:?}",
                            self.cyclonedx_version
                        ),
                    });
                }
            }
            other => {
                return Err(GeneratorError::InvalidConfig {
                    field: "format".to_owned(),
                    reason: format!("unsupported format '{other}'"),
                });
            }
        }
        Ok(())
    }

    /// The version string to pass to the format factory for the configured format.
    pub fn active_version(&self) -> &str {
        match self.format.to_ascii_lowercase().as_str() {
            "spdx" => &self.spdx_version,
            _ => &self.cyclonedx_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    inner: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.inner.format = format.into();
        self
    }

    pub fn spdx_version(mut self, version: impl Into<String>) -> Self {
        self.inner.spdx_version = version.into();
        self
    }

    pub fn cyclonedx_version(mut self, version: impl Into<String>) -> Self {
        self.inner.cyclonedx_version = version.into();
        self
    }

    pub fn transitive_dependencies(mut self, enabled: bool) -> Self {
        self.inner.transitive_dependencies = enabled;
        self
    }

    pub fn suppress_warnings(mut self, suppress: bool) -> Self {
        self.inner.suppress_warnings = suppress;
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<GeneratorConfig, GeneratorError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
