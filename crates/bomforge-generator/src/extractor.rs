//! The `MetadataExtractor` collaborator contract and the one explicit parallel
//! facility this crate exposes: a file-level fan-out driver for running an
//! extractor over an independent list of paths.

use bomforge_core::Component;

/// Populates components from binary/archive inputs. The generator never links
/// against a concrete ELF/Mach-O/PE parser; callers provide this trait (or a
/// test double) so the core stays format-agnostic.
pub trait MetadataExtractor: Send + Sync {
    /// Populate `component` in place. Returns `false` if extraction failed for this file
    /// (the component is left with whatever fields were already set).
    fn extract_metadata(&self, component: &mut Component) -> bool;

    fn is_elf(&self, path: &str) -> bool {
        let _ = path;
        false
    }
    fn is_mach_o(&self, path: &str) -> bool {
        let _ = path;
        false
    }
    fn is_pe(&self, path: &str) -> bool {
        let _ = path;
        false
    }
    fn is_archive(&self, path: &str) -> bool {
        let _ = path;
        false
    }
}

/// Runs `extractor` over every path in `paths` using one OS thread per logical CPU,
/// preserving input order in the result. Each worker calls only `extract_metadata`;
/// it must not invoke DWARF/debug-info extraction, which is not safe to run
/// concurrently — that is the caller's responsibility to honor inside the trait impl.
pub fn extract_parallel<E: MetadataExtractor>(extractor: &E, paths: &[String]) -> Vec<Component> {
    if paths.is_empty() {
        return Vec::new();
    }

    let worker_count = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(paths.len());

    let mut results: Vec<Option<Component>> = (0..paths.len()).map(|_| None).collect();
    let chunk_size = paths.len().div_ceil(worker_count);

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for (chunk_idx, chunk) in paths.chunks(chunk_size).enumerate() {
            let base = chunk_idx * chunk_size;
            handles.push(scope.spawn(move || {
                let mut out = Vec::with_capacity(chunk.len());
                for path in chunk {
                    let name = path.rsplit('/').next().unwrap_or(path).to_owned();
                    let mut component = match Component::new(&name, path) {
                        Ok(c) => c,
                        Err(_) => continue,
                    };
                    extractor.extract_metadata(&mut component);
                    out.push(component);
                }
                (base, out)
            }));
        }
        for handle in handles {
            let (base, out) = handle.join().expect("extractor worker panicked");
            for (i, component) in out.into_iter().enumerate() {
                results[base + i] = Some(component);
            }
        }
    });

    results.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopExtractor;
    impl MetadataExtractor for NoopExtractor {
        fn extract_metadata(&self, component: &mut Component) -> bool {
            component.version = "1.0.0".to_owned();
            true
        }
    }

    #[test]
    fn empty_paths_yield_empty_result() {
        let extractor = NoopExtractor;
        assert!(extract_parallel(&extractor, &[]).is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let extractor = NoopExtractor;
        let paths: Vec<String> = (0..40).map(|i| format!("/lib/lib{i}.so")).collect();
        let result = extract_parallel(&extractor, &paths);
        assert_eq!(result.len(), paths.len());
        for (i, component) in result.iter().enumerate() {
            assert_eq!(component.name, format!("lib{i}.so"));
            assert_eq!(component.version, "1.0.0");
        }
    }
}
