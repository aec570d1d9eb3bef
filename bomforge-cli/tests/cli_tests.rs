//! End-to-end tests driving the compiled `bomforge` binary.

use std::process::Command;

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bomforge"))
}

fn sample_manifest(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("manifest.json");
    std::fs::write(
        &path,
        r#"[
            {"name": "app", "version": "1.0.0", "file_path": "/bin/app", "file_type": "Executable"},
            {"name": "libA", "version": "2.0.0", "file_path": "/lib/libA.so", "file_type": "SharedLibrary"}
        ]"#,
    )
    .unwrap();
    path
}

#[test]
fn generate_then_validate_round_trips() {
    let dir = TempDir::new().unwrap();
    let manifest = sample_manifest(&dir);
    let output = dir.path().join("sbom.json");

    let status = bin()
        .args([
            "generate",
            manifest.to_str().unwrap(),
            "--format",
            "cyclonedx",
            "--cyclonedx-version",
            "1.6",
            "--output-path",
        ])
        .arg(&output)
        .status()
        .expect("failed to run bomforge generate");
    assert!(status.success());
    assert!(output.exists());

    let status = bin()
        .args(["validate"])
        .arg(&output)
        .status()
        .expect("failed to run bomforge validate");
    assert!(status.success());
}

#[test]
fn diff_reports_added_component() {
    let dir = TempDir::new().unwrap();
    let manifest_old = dir.path().join("old.json");
    let manifest_new = sample_manifest(&dir);
    std::fs::write(
        &manifest_old,
        r#"[{"name": "app", "version": "1.0.0", "file_path": "/bin/app", "file_type": "Executable"}]"#,
    )
    .unwrap();

    let old_sbom = dir.path().join("old.sbom.json");
    let new_sbom = dir.path().join("new.sbom.json");

    for (manifest, out) in [(&manifest_old, &old_sbom), (&manifest_new, &new_sbom)] {
        let status = bin()
            .args(["generate"])
            .arg(manifest)
            .args(["--format", "cyclonedx", "--cyclonedx-version", "1.6", "--output-path"])
            .arg(out)
            .status()
            .unwrap();
        assert!(status.success());
    }

    let output = bin()
        .args(["diff"])
        .arg(&old_sbom)
        .arg(&new_sbom)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("ADDED"));
}

#[test]
fn validate_rejects_garbage_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "not an sbom").unwrap();

    let status = bin().args(["validate"]).arg(&path).status().unwrap();
    assert!(!status.success());
    assert_eq!(status.code(), Some(2));
}
