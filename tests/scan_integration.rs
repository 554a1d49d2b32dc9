//! Integration tests for the scan command

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;

fn spacemap() -> Command {
    Command::cargo_bin("spacemap").unwrap()
}

fn create_sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    File::create(root.join("a.txt"))
        .unwrap()
        .write_all(&[b'a'; 100])
        .unwrap();
    File::create(root.join("b.txt"))
        .unwrap()
        .write_all(&[b'b'; 200])
        .unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    File::create(root.join("sub/c.txt"))
        .unwrap()
        .write_all(&[b'c'; 50])
        .unwrap();

    dir
}

#[test]
fn test_scan_basic() {
    let dir = create_sample_tree();

    spacemap()
        .arg("scan")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.txt"))
        .stdout(predicate::str::contains("sub"));
}

#[test]
fn test_scan_shows_total() {
    let dir = create_sample_tree();

    spacemap()
        .arg("scan")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total:"))
        .stdout(predicate::str::contains("3 files"));
}

#[test]
fn test_scan_sorted_by_size() {
    let dir = create_sample_tree();

    let output = spacemap().arg("scan").arg(dir.path()).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let b_pos = stdout.find("b.txt").unwrap();
    let a_pos = stdout.find("a.txt").unwrap();
    let sub_pos = stdout.find("sub\n").unwrap();
    assert!(b_pos < a_pos);
    assert!(a_pos < sub_pos);
}

#[test]
fn test_scan_json_output() {
    let dir = create_sample_tree();

    let output = spacemap()
        .arg("scan")
        .arg("--json")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert!(json["root"].is_string());
    assert_eq!(json["total_size"], 350);
    assert_eq!(json["files_seen"], 3);

    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["size"], 200);
    assert!(entries[0]["path"].as_str().unwrap().ends_with("b.txt"));
}

#[test]
fn test_scan_top_n_groups_other() {
    let dir = TempDir::new().unwrap();
    for i in 1..=10 {
        File::create(dir.path().join(format!("file{}.txt", i)))
            .unwrap()
            .write_all(&vec![0u8; i * 10])
            .unwrap();
    }

    let output = spacemap()
        .args(["scan", "--json", "-n", "3"])
        .arg(dir.path())
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json["entries"].as_array().unwrap();

    assert_eq!(entries.len(), 4);
    assert!(entries[3]["path"].as_str().unwrap().ends_with("(Other)"));
    // 10+20+...+70
    assert_eq!(entries[3]["size"], 280);
    assert_eq!(json["total_size"], 550);
}

#[test]
fn test_scan_skips_symlinks() {
    let dir = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    File::create(target.path().join("huge.bin"))
        .unwrap()
        .write_all(&vec![0u8; 100_000])
        .unwrap();
    std::os::unix::fs::symlink(target.path().join("huge.bin"), dir.path().join("link")).unwrap();

    spacemap()
        .arg("scan")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to display"))
        .stdout(predicate::str::contains("0 files"));
}

#[test]
fn test_scan_empty_directory() {
    let dir = TempDir::new().unwrap();

    spacemap()
        .arg("scan")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 files"));
}

#[test]
fn test_scan_nonexistent_path() {
    spacemap()
        .arg("scan")
        .arg("/nonexistent/path/12345")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/path/12345"));
}

#[test]
fn test_scan_file_instead_of_directory() {
    let dir = create_sample_tree();

    spacemap()
        .arg("scan")
        .arg(dir.path().join("a.txt"))
        .assert()
        .failure();
}

#[test]
fn test_scan_quiet_flag() {
    let dir = create_sample_tree();

    spacemap()
        .arg("-q")
        .arg("scan")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_scan_timeout_cancels_with_exit_130() {
    let dir = TempDir::new().unwrap();
    for d in 0..200 {
        let sub = dir.path().join(format!("dir{}", d));
        fs::create_dir(&sub).unwrap();
        for f in 0..100 {
            File::create(sub.join(format!("file{}", f))).unwrap();
        }
    }

    spacemap()
        .arg("scan")
        .arg("--timeout")
        .arg("0")
        .arg("--no-progress")
        .arg(dir.path())
        .assert()
        .code(130)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Scan timed out after"));
}
