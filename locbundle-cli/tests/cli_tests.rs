use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use zip::{ZipWriter, write::SimpleFileOptions};

fn locbundle_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("locbundle"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_bundle(path: &Path) {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in [
        ("app/default/main.json", r#"{"title":"Weather","units":"metric","days":7}"#),
        ("app/en/main.json", r#"{"title":"Weather (en)"}"#),
        ("app/en-US/main.json", r#"{"units":"imperial"}"#),
        ("app/en-US/broken.json", "{"),
        ("app/fr/main.json", r#"{"title":"Météo"}"#),
    ] {
        writer
            .start_file(name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    let bytes = writer.finish().unwrap().into_inner();
    fs::write(path, bytes).unwrap();
}

#[test]
fn test_load_prints_merged_json() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = temp_dir.path().join("bundle.zip");
    write_bundle(&bundle);

    let output = locbundle_cmd()
        .args(["load", "-b", bundle.to_str().unwrap(), "-c", "en-US"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        data,
        serde_json::json!({"title":"Weather (en)","units":"imperial","days":7})
    );

    // The malformed entry is skipped with a warning on stderr.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("app/en-US/broken.json"), "stderr: {}", stderr);
}

#[test]
fn test_load_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = temp_dir.path().join("bundle.zip");
    write_bundle(&bundle);
    let output_file = temp_dir.path().join("out").join("fr.json");

    let output = locbundle_cmd()
        .args([
            "load",
            "-b",
            bundle.to_str().unwrap(),
            "-c",
            "fr_FR.UTF-8",
            "-o",
            output_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let content = fs::read_to_string(&output_file).unwrap();
    let data: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(data["title"], "Météo");
    assert_eq!(data["units"], "metric");
}

#[test]
fn test_load_reads_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = temp_dir.path().join("bundle.zip");
    write_bundle(&bundle);
    let config = temp_dir.path().join("locbundle.toml");
    fs::write(
        &config,
        format!(
            "bundle = {:?}\nculture = \"fr-CA\"\n\n[load]\nacquire_timeout_ms = 5000\n",
            bundle.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = locbundle_cmd()
        .args(["load", "--config", config.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data["title"], "Météo");
}

#[test]
fn test_load_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("strings");
    fs::create_dir_all(root.join("default")).unwrap();
    fs::create_dir_all(root.join("de")).unwrap();
    fs::write(
        root.join("default").join("app.strings"),
        "\"ok\" = \"OK\";\n\"cancel\" = \"Cancel\";\n",
    )
    .unwrap();
    fs::write(root.join("de").join("app.strings"), "\"cancel\" = \"Abbrechen\";\n").unwrap();

    let output = locbundle_cmd()
        .args([
            "load",
            "-b",
            root.to_str().unwrap(),
            "-c",
            "de-DE",
            "-f",
            "strings",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data, serde_json::json!({"ok":"OK","cancel":"Abbrechen"}));
}

#[test]
fn test_layers_lists_groups() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = temp_dir.path().join("bundle.zip");
    write_bundle(&bundle);

    let output = locbundle_cmd()
        .args(["layers", "-b", bundle.to_str().unwrap(), "-c", "en-US"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("default /default/ (1):\n  app/default/main.json\n"));
    assert!(stdout.contains("family /en/ (1):\n  app/en/main.json\n"));
    assert!(stdout.contains("full /en-US/ (2):\n  app/en-US/broken.json\n  app/en-US/main.json\n"));
    assert!(!stdout.contains("app/fr/main.json"));
}

#[test]
fn test_missing_bundle_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.zip");

    let output = locbundle_cmd()
        .args(["load", "-b", missing.to_str().unwrap(), "-c", "en-US"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Bundle does not exist"));
}

#[test]
fn test_unknown_format_fails() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = temp_dir.path().join("bundle.zip");
    write_bundle(&bundle);

    let output = locbundle_cmd()
        .args(["load", "-b", bundle.to_str().unwrap(), "-c", "en", "-f", "yaml"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported format: yaml"));
}

#[test]
fn test_invalid_default_segment_fails() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = temp_dir.path().join("bundle.zip");
    write_bundle(&bundle);

    let output = locbundle_cmd()
        .args([
            "load",
            "-b",
            bundle.to_str().unwrap(),
            "-c",
            "en",
            "--default-segment",
            "a/b",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid default segment"));
}
