use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn langsync(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_langsync"))
        .args(args)
        .env_remove("LANGSYNC_LOG")
        .output()
        .unwrap()
}

fn write_locales(dir: &Path) {
    fs::write(
        dir.join("strings_en.json"),
        r#"{"greeting": {"hello": "Hello", "bye": "Goodbye"}, "title": "Home"}"#,
    )
    .unwrap();
    fs::write(
        dir.join("strings_fr.json"),
        r#"{"greeting": {"hello": "Bonjour"}}"#,
    )
    .unwrap();
}

#[test]
fn test_sync_fills_missing_keys_with_pseudo_provider() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());

    let out = langsync(&[
        "sync",
        temp_dir.path().to_str().unwrap(),
        "--provider",
        "pseudo",
    ]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let synced: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("strings_fr.json")).unwrap())
            .unwrap();
    assert_eq!(synced["greeting"]["hello"], "Bonjour");
    assert_eq!(synced["greeting"]["bye"], "[fr] Goodbye");
    assert_eq!(synced["title"], "[fr] Home");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Updated: 1"));
    assert!(stdout.contains("Keys filled: 2"));
    assert!(stdout.contains("✅ Sync complete"));
}

#[test]
fn test_sync_dry_run_does_not_write_target() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());
    let target = temp_dir.path().join("strings_fr.json");
    let before = fs::read_to_string(&target).unwrap();

    let out = langsync(&[
        "sync",
        temp_dir.path().to_str().unwrap(),
        "--provider",
        "passthrough",
        "--dry-run",
    ]);
    assert!(out.status.success());

    assert_eq!(fs::read_to_string(&target).unwrap(), before);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Dry-run mode: no files were written"));
    assert!(stdout.contains("would be updated"));
}

#[test]
fn test_sync_writes_report_json() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());
    fs::write(temp_dir.path().join("strings_de.json"), "not json").unwrap();
    let report = temp_dir.path().join("out").join("report.json");

    let out = langsync(&[
        "sync",
        temp_dir.path().to_str().unwrap(),
        "--provider",
        "passthrough",
        "--report-json",
        report.to_str().unwrap(),
    ]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["master_keys"], 3);
    assert_eq!(report["dry_run"], false);

    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["language"], "de");
    assert_eq!(files[0]["status"], "skipped");
    assert_eq!(files[1]["language"], "fr");
    assert_eq!(files[1]["status"], "updated");
    assert_eq!(files[1]["translated"], 2);

    // Unparsable targets are left alone.
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("strings_de.json")).unwrap(),
        "not json"
    );
}

#[test]
fn test_sync_without_master_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("strings_fr.json"), "{}").unwrap();

    let out = langsync(&[
        "sync",
        temp_dir.path().to_str().unwrap(),
        "--provider",
        "pseudo",
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no master file found"));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("strings_fr.json")).unwrap(),
        "{}"
    );
}

#[test]
fn test_sync_with_invalid_master_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("strings_en.json"), "{ broken").unwrap();
    fs::write(temp_dir.path().join("strings_fr.json"), "{}").unwrap();

    let out = langsync(&[
        "sync",
        temp_dir.path().to_str().unwrap(),
        "--provider",
        "pseudo",
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to load master file"));
}

#[test]
fn test_sync_uses_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("base.json"),
        r#"{"menu": {"open": "Open"}}"#,
    )
    .unwrap();
    fs::write(temp_dir.path().join("it.json"), "{}").unwrap();
    fs::write(
        temp_dir.path().join("langsync.toml"),
        "markers = [\"base\"]\ndelimiter = \"/\"\nprovider = \"pseudo\"\n",
    )
    .unwrap();

    let out = langsync(&["sync", temp_dir.path().to_str().unwrap()]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let synced: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("it.json")).unwrap())
            .unwrap();
    assert_eq!(synced["menu"]["open"], "[it] Open");
}

#[test]
fn test_sync_rejects_invalid_source_language() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());

    let out = langsync(&[
        "sync",
        temp_dir.path().to_str().unwrap(),
        "--provider",
        "pseudo",
        "--source-lang",
        "not a language",
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Language code validation failed"));
}

#[test]
fn test_second_sync_leaves_files_untouched() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());
    let dir = temp_dir.path().to_str().unwrap();

    assert!(langsync(&["sync", dir, "--provider", "pseudo"]).status.success());
    let first = fs::read_to_string(temp_dir.path().join("strings_fr.json")).unwrap();

    let out = langsync(&["sync", dir, "--provider", "pseudo"]);
    assert!(out.status.success());
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("strings_fr.json")).unwrap(),
        first
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Up to date: 1"));
    assert!(stdout.contains("Keys filled: 0"));
}

#[test]
fn test_sync_rejects_invalid_source_language_in_config() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());
    fs::write(
        temp_dir.path().join("langsync.toml"),
        "source_language = \"en_GB!\"\nprovider = \"pseudo\"\n",
    )
    .unwrap();
    let target = temp_dir.path().join("strings_fr.json");
    let before = fs::read_to_string(&target).unwrap();

    let out = langsync(&["sync", temp_dir.path().to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Language code validation failed"));
    assert_eq!(fs::read_to_string(&target).unwrap(), before);
}
