//! The [`Generator`]: ingests components, walks transitive dependencies, and
//! dispatches to the matching format handler to produce an SBOM document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bomforge_core::{Component, SbomDocument, SbomFormat};
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;

/// Canonicalizes a path the way the generator uses as its dedup key: absolute,
/// `.`/`..` resolved where possible, falling back to the input string if the
/// path does not exist on disk (synthetic/unresolved dependency entries).
fn canonical_key(path: &str) -> String {
    match std::fs::canonicalize(path) {
        Ok(p) => p.to_string_lossy().into_owned(),
        Err(_) => {
            let p = Path::new(path);
            if p.is_absolute() {
                path.to_owned()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(p).to_string_lossy().into_owned())
                    .unwrap_or_else(|_| path.to_owned())
            }
        }
    }
}

fn resolve_rpath(dep: &str, parent_dir: &Path) -> String {
    if let Some(rest) = dep.strip_prefix("@rpath/") {
        parent_dir.join(rest).to_string_lossy().into_owned()
    } else {
        dep.to_owned()
    }
}

/// Ingests [`Component`]s one at a time, deduplicating by canonical file path and
/// optionally walking each component's declared dependencies to build a transitive
/// closure, then emits the accumulated set through a format handler.
pub struct Generator {
    config: GeneratorConfig,
    components: BTreeMap<String, Component>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        Ok(Generator {
            config,
            components: BTreeMap::new(),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Ingest a component. Idempotent: re-processing the same file path is a no-op.
    /// When `transitive_dependencies` is enabled, recursively synthesizes and ingests
    /// an entry for each declared dependency not already present.
    pub fn process(&mut self, component: Component) {
        let key = canonical_key(&component.file_path);
        if self.components.contains_key(&key) {
            debug!(path = %key, "component already processed, skipping");
            return;
        }

        let deps = component.dependencies.clone();
        let parent_dir = PathBuf::from(&component.file_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        self.components.insert(key, component);

        if !self.config.transitive_dependencies {
            return;
        }

        for dep in deps {
            let dep_path = resolve_rpath(&dep, &parent_dir);
            let dep_key = canonical_key(&dep_path);
            if self.components.contains_key(&dep_key) {
                continue;
            }
            let name = dep_path.rsplit('/').next().unwrap_or(&dep_path).to_owned();
            match Component::new(&name, &dep_path) {
                Ok(synthetic) => self.process(synthetic),
                Err(e) => warn!(dependency = %dep, error = %e, "could not synthesize dependency component"),
            }
        }
    }

    /// Build the envelope around the components ingested so far, sorted by
    /// `bom_ref` for deterministic emission.
    pub fn document(&self) -> Result<SbomDocument, GeneratorError> {
        if self.components.is_empty() {
            return Err(GeneratorError::NoComponents);
        }
        let format = SbomFormat::parse(&self.config.format)
            .ok_or_else(|| GeneratorError::InvalidConfig {
                field: "format".to_owned(),
                reason: format!("unsupported format '{}'", self.config.format),
            })?;
        let mut doc = SbomDocument::new(format, self.config.active_version());
        doc.metadata.extra = self.config.metadata.clone();
        doc.components = self.components.values().cloned().collect();
        Ok(doc)
    }

    /// Render all ingested components through the configured format handler.
    pub fn generate(&self) -> Result<String, GeneratorError> {
        let doc = self.document()?;
        let handler = bomforge_formats::resolve(&self.config.format, self.config.active_version())?;
        let components: Vec<Component> = doc.components_sorted().into_iter().cloned().collect();
        let rendered = handler.emit(&components, &doc.metadata)?;
        Ok(rendered)
    }

    /// Render and write the SBOM to `output_path`.
    pub fn generate_to_file(&self, output_path: &str) -> Result<(), GeneratorError> {
        if output_path.is_empty() {
            return Err(GeneratorError::NoOutputPath);
        }
        let rendered = self.generate()?;
        std::fs::write(output_path, rendered).map_err(|source| GeneratorError::Io {
            path: output_path.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfigBuilder;

    fn generator() -> Generator {
        let cfg = GeneratorConfigBuilder::new()
            .format("cyclonedx")
            .cyclonedx_version("1.6")
            .build()
            .unwrap();
        Generator::new(cfg).unwrap()
    }

    #[test]
    fn empty_generator_fails_to_generate() {
        let g = generator();
        assert!(matches!(g.generate(), Err(GeneratorError::NoComponents)));
    }

    #[test]
    fn process_is_idempotent_for_same_path() {
        let mut g = generator();
        let c1 = Component::new("libfoo", "/nonexistent/libfoo.so").unwrap();
        let c2 = Component::new("libfoo", "/nonexistent/libfoo.so").unwrap();
        g.process(c1);
        g.process(c2);
        assert_eq!(g.component_count(), 1);
    }

    #[test]
    fn process_walks_transitive_dependencies() {
        let mut g = generator();
        let mut app = Component::new("app", "/nonexistent/app").unwrap();
        app.dependencies = vec!["/nonexistent/libA.so".to_owned()];
        g.process(app);
        assert_eq!(g.component_count(), 2);
    }

    #[test]
    fn generate_to_file_requires_nonempty_path() {
        let mut g = generator();
        g.process(Component::new("libfoo", "/nonexistent/libfoo.so").unwrap());
        assert!(matches!(
            g.generate_to_file(""),
            Err(GeneratorError::NoOutputPath)
        ));
    }

    #[test]
    fn generate_produces_cyclonedx_json() {
        let mut g = generator();
        g.process(Component::new("libfoo", "/nonexistent/libfoo.so").unwrap());
        let out = g.generate().unwrap();
        assert!(out.contains("CycloneDX"));
    }

    #[test]
    fn transitive_dependencies_disabled_leaves_one_component() {
        let cfg = GeneratorConfigBuilder::new()
            .format("cyclonedx")
            .cyclonedx_version("1.6")
            .transitive_dependencies(false)
            .build()
            .unwrap();
        let mut g = Generator::new(cfg).unwrap();
        let mut app = Component::new("app", "/nonexistent/app").unwrap();
        app.dependencies = vec!["/nonexistent/libA.so".to_owned()];
        g.process(app);
        assert_eq!(g.component_count(), 1);
    }
}
