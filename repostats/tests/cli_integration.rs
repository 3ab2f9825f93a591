//! Integration tests for repostats CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn run_repostats(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_repostats"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn create_fixture(root: &Path) {
    write(root, ".gitignore", b"dist/\n");
    write(root, "notes.txt", b"hello\nworld\n");
    write(root, "README", b"x");
    write(root, "src/app.py", b"import os\n\nprint(os.name)\n");
    write(root, "dist/bundle.txt", b"generated\n");
    write(root, ".git/config", b"[core]\n");
    write(root, "photo.bin", b"\x00\x01\x02");
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_repostats(&["--help"]);

    assert!(success);
    assert!(stdout.contains("repostats"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--exclude"));
    assert!(stdout.contains("--ignore-file"));
    assert!(stdout.contains("--jobs"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_repostats(&["--version"]);

    assert!(success);
    assert!(stdout.contains("repostats"));
}

#[test]
fn test_table_output() {
    let temp = tempdir().unwrap();
    create_fixture(temp.path());

    let (stdout, _, success) = run_repostats(&[temp.path().to_str().unwrap()]);

    assert!(success);
    assert!(stdout.contains("Filetype"));
    assert!(stdout.contains("Avg LOC"));
    assert!(stdout.contains(".txt"));
    assert!(stdout.contains(".py"));
    assert!(stdout.contains("(no extension)"));
    assert!(!stdout.contains(".bin"));
    assert!(stdout.contains("Total (3 files)"));
}

#[test]
fn test_status_output() {
    let temp = tempdir().unwrap();
    create_fixture(temp.path());

    let (stdout, _, success) =
        run_repostats(&[temp.path().to_str().unwrap(), "--output", "status"]);

    assert!(success);
    assert_eq!(stdout.trim(), "Repo Stats: 3 files, 6 lines");
}

#[test]
fn test_details_output() {
    let temp = tempdir().unwrap();
    create_fixture(temp.path());

    let (stdout, _, success) =
        run_repostats(&[temp.path().to_str().unwrap(), "-o", "details"]);

    assert!(success);
    assert!(stdout.contains(".txt files: 1"));
    assert!(stdout.contains("Lines of Code - total: 3, min: 3, avg: 3, max: 3"));
    assert!(stdout.contains("Total: 3 files, 6 lines of code"));
}

#[test]
fn test_json_output() {
    let temp = tempdir().unwrap();
    create_fixture(temp.path());

    let (stdout, _, success) = run_repostats(&[temp.path().to_str().unwrap(), "-o", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["total_files"], 3);
    assert_eq!(parsed["total_lines"], 6);
    assert_eq!(parsed["extensions"][".txt"]["total_lines"], 2);
    assert_eq!(parsed["extensions"]["(no extension)"]["file_count"], 1);
    assert!(parsed["extensions"].get(".bin").is_none());
}

#[test]
fn test_markdown_output() {
    let temp = tempdir().unwrap();
    create_fixture(temp.path());

    let (stdout, _, success) =
        run_repostats(&[temp.path().to_str().unwrap(), "-o", "markdown"]);

    assert!(success);
    assert!(stdout.contains("**File Type Statistics**"));
    assert!(stdout.contains("| `.txt` | 1 | 2 |"));
}

#[test]
fn test_exclude_and_binary_ext() {
    let temp = tempdir().unwrap();
    create_fixture(temp.path());

    let (stdout, _, success) = run_repostats(&[
        temp.path().to_str().unwrap(),
        "-o",
        "json",
        "--exclude",
        "src/**",
        "--binary-ext",
        "txt",
    ]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["total_files"], 1);
    assert!(parsed["extensions"].get(".py").is_none());
    assert!(parsed["extensions"].get(".txt").is_none());
}

#[test]
fn test_parallel_matches_sequential() {
    let temp = tempdir().unwrap();
    create_fixture(temp.path());
    let root = temp.path().to_str().unwrap();

    let (sequential, _, ok_seq) = run_repostats(&[root, "-o", "json"]);
    let (parallel, _, ok_par) = run_repostats(&[root, "-o", "json", "--jobs", "3"]);

    assert!(ok_seq && ok_par);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_verbose_logs_options_and_totals() {
    let temp = tempdir().unwrap();
    create_fixture(temp.path());

    let (stdout, stderr, success) =
        run_repostats(&[temp.path().to_str().unwrap(), "-o", "status", "-vv"]);

    assert!(success);
    assert_eq!(stdout.trim(), "Repo Stats: 3 files, 6 lines");
    assert!(stderr.contains("scan options"));
    assert!(stderr.contains("filtered=false"));
    assert!(stderr.contains("report ready"));
    // notes.txt (12) + README (1) + src/app.py (26)
    assert!(stderr.contains("bytes=39"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_fails() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempdir().unwrap();
    create_fixture(temp.path());
    write(temp.path(), "locked/inner.txt", b"hidden\n");
    let locked = temp.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users read through the mode bits
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let (stdout, stderr, success) = run_repostats(&[temp.path().to_str().unwrap()]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(!success);
    assert!(stdout.contains("Repo Stats: Indexing failed"));
    assert!(stderr.contains("failed to read directory"));
}

#[test]
fn test_invalid_path() {
    let (stdout, stderr, success) = run_repostats(&["/nonexistent/path"]);

    assert!(!success);
    assert!(stdout.contains("Repo Stats: Indexing failed"));
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_invalid_glob() {
    let temp = tempdir().unwrap();

    let (_, stderr, success) =
        run_repostats(&[temp.path().to_str().unwrap(), "--include", "[invalid"]);

    assert!(!success);
    assert!(stderr.contains("invalid glob pattern"));
}

#[test]
fn test_invalid_output_format() {
    let (_, stderr, success) = run_repostats(&[".", "--output", "yaml"]);

    assert!(!success);
    assert!(stderr.contains("yaml"));
}
