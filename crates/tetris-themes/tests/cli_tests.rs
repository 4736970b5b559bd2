//! Runs the `tetris-themes` binary the way a user would.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tetris-themes"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start tetris-themes");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for tetris-themes")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_single_prompts_for_name() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("neon.json"), r#"{"bg": [255, 255, 255]}"#).unwrap();

    let output = run(dir.path(), &["single"], "neon\n");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout(&output),
        "json file name: Written 1 colors to neon.bin\n"
    );
    assert_eq!(fs::read(dir.path().join("neon.bin")).unwrap(), vec![0xFF]);
}

#[test]
fn test_single_name_argument_skips_prompt() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("dark.json"), r#"{"bg": [0, 0, 0]}"#).unwrap();

    let output = run(dir.path(), &["single", "dark"], "");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Written 1 colors to dark.bin\n");
}

#[test]
fn test_single_missing_file_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = run(dir.path(), &["single", "ghost"], "");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ghost.json not found"));
    assert!(!dir.path().join("ghost.bin").exists());
}

#[test]
fn test_batch_reports_each_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("theme_01.json"), r#"{"bg": [0, 0, 0]}"#).unwrap();
    fs::write(dir.path().join("theme_03.json"), r#"{"bg": [255, 0, 0]}"#).unwrap();

    let output = run(dir.path(), &["batch"], "");

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Warning: theme_00.json missing, skipping.\n\
         Processing theme_01.json...\n\
         Warning: theme_02.json missing, skipping.\n\
         Processing theme_03.json...\n\
         Done: wrote 2 bytes to themes.bin\n"
    );
    // skips are reported once, on stdout
    assert_eq!(String::from_utf8_lossy(&output.stderr), "");
    assert_eq!(
        fs::read(dir.path().join("themes.bin")).unwrap(),
        vec![0xC0, 0xF0]
    );
}

#[test]
fn test_batch_dir_and_config() {
    let work = tempfile::tempdir().expect("Failed to create temp dir");
    let themes = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(themes.path().join("pack_00.json"), r#"{"bg": [0, 0, 0]}"#).unwrap();
    let config = work.path().join("config.json");
    fs::write(
        &config,
        r#"{"batch": {"prefix": "pack_", "count": 1, "output": "pack.bin"}}"#,
    )
    .unwrap();

    let output = run(
        work.path(),
        &[
            "batch",
            "--dir",
            themes.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ],
        "",
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read(themes.path().join("pack.bin")).unwrap(), vec![0xC0]);
}
