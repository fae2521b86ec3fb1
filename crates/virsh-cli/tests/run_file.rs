// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Integration tests for the `virsh` binary: running scripts, exit codes,
//! error output and the `--io` flag.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn virsh_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_virsh"))
}

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// A script file in its own temporary directory. Keep the `TempDir`
/// alive for as long as the path is used.
fn script(name: &str, source: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, source).unwrap();
    (dir, path)
}

fn virsh(args: &[&str]) -> Output {
    Command::new(virsh_binary())
        .args(args)
        .current_dir(fixtures())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run virsh")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn runs_a_script_and_prints_the_result() {
    let out = virsh(&["run", "greet.vsh"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "hello world\n10\n");
}

#[test]
fn bare_path_is_run() {
    let out = virsh(&["greet.vsh"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "hello world\n10\n");
}

#[test]
fn undefined_result_prints_nothing() {
    let (_dir, path) = script("quiet.vsh", "write 'a'; write 'b'; nothing");
    let out = virsh(&["run", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "ab");
}

#[test]
fn syntax_errors_point_at_the_line() {
    let (_dir, path) = script("broken.vsh", "x = 1;\ny = ");
    let out = virsh(&["run", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error: Expected expression"), "stderr: {}", err);
    assert!(err.contains("line 2:5"), "stderr: {}", err);
    assert!(err.contains('^'));
    assert_eq!(stdout(&out), "");
}

#[test]
fn runtime_errors_exit_with_status_one() {
    let (_dir, path) = script("bad.vsh", "print 'before'; 1 + 'a'");
    let out = virsh(&["run", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "before\n");
    assert!(stderr(&out).starts_with("error: "), "stderr: {}", stderr(&out));
}

#[test]
fn missing_file_is_an_error() {
    let out = virsh(&["run", "does-not-exist.vsh"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("reading"));
}

#[test]
fn io_namespaces_need_the_flag() {
    let (_dir, path) = script("read.vsh", "fs.read 'data.txt'");
    let path = path.to_str().unwrap();

    let out = virsh(&["--io", "run", path]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "data from disk\n\n");

    let out = virsh(&["run", path]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn fmt_prints_formatted_source() {
    let (_dir, path) = script("messy.vsh", "a=1+2");
    let out = virsh(&["fmt", path.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).trim_end(), "a = 1 + 2");
}

#[test]
fn unknown_option_shows_usage() {
    let out = virsh(&["--bogus"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("Usage"));
}

#[test]
fn version_flag() {
    let out = virsh(&["--version"]);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("virsh "));
}

#[test]
fn stdin_is_a_single_pass_stream_of_trimmed_lines() {
    let (_dir, path) = script(
        "stdin.vsh",
        "for l <- io.stdin { print \"got {l}\" }; n = 0; for x <- io.stdin { n++ }; n",
    );
    let mut child = Command::new(virsh_binary())
        .args(["--io", "run", path.to_str().unwrap()])
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run virsh");
    child.stdin.take().unwrap().write_all(b" a \nb\n").unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "got a\ngot b\n0\n");
}
