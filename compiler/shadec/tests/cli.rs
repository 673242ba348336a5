#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end runs of the `shadec` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn shadec(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shadec"))
        .args(args)
        .env_remove("SHADE_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run shadec")
}

fn write(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn clean_file_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "ok.wgsl", "fn main() { return; }");
    let output = shadec(&[file.to_str().unwrap()]);
    assert!(output.status.success(), "{}", text(&output.stderr));
    assert_eq!(text(&output.stdout), "");
    assert_eq!(text(&output.stderr), "");
}

#[test]
fn syntax_error_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bad.wgsl", "fn main() {\n  x = ;\n}\n");
    let output = shadec(&["--color=never", file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = text(&output.stderr);
    assert!(stderr.contains("bad.wgsl:2:"), "{stderr}");
    assert!(stderr.contains("unable to parse right side of assignment"), "{stderr}");
    assert!(stderr.contains("  x = ;\n"), "{stderr}");
    assert!(stderr.contains('^'), "{stderr}");
}

#[test]
fn print_writes_canonical_source() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(
        dir.path(),
        "loop.wgsl",
        "fn f(){var i:i32=0;loop{if(i>3){break;}continuing{i=i+1;}}}",
    );
    let output = shadec(&["--print", file.to_str().unwrap()]);
    assert!(output.status.success(), "{}", text(&output.stderr));
    assert_eq!(
        text(&output.stdout),
        "fn f() {
  var i : i32 = 0;
  loop {
    if (i > 3) {
      break;
    }
    continuing {
      i = i + 1;
    }
  }
}
"
    );
}

#[test]
fn json_output() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bad.wgsl", "fn f() { x = ; }");
    let output = shadec(&["--format=json", file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = text(&output.stdout);
    assert!(stdout.starts_with("[\n"), "{stdout}");
    assert!(stdout.contains("\"severity\": \"error\""), "{stdout}");
    assert!(
        stdout.contains("\"message\": \"unable to parse right side of assignment\""),
        "{stdout}"
    );
    assert_eq!(text(&output.stderr), "");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.wgsl");
    let missing = missing.to_str().unwrap();
    let output = shadec(&[missing]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        text(&output.stderr).starts_with(&format!("error: cannot find file '{missing}'")),
        "{}",
        text(&output.stderr)
    );
}

#[test]
fn diagnostics_follow_argument_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write(dir.path(), "first.wgsl", "fn f() { x = ; }");
    let second = write(dir.path(), "second.wgsl", "fn g() { y = ; }");
    let output = shadec(&[
        "--color=never",
        second.to_str().unwrap(),
        first.to_str().unwrap(),
    ]);
    let stderr = text(&output.stderr);
    let second_at = stderr.find("second.wgsl").unwrap();
    let first_at = stderr.find("first.wgsl").unwrap();
    assert!(second_at < first_at, "{stderr}");
    assert!(stderr.ends_with("error: aborting due to 2 previous errors\n"), "{stderr}");
}

#[test]
fn max_errors_flag() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "many.wgsl", "fn f() { a = ; b = ; c = ; }");
    let output = shadec(&["--color=never", "--max-errors=1", file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = text(&output.stderr);
    assert!(stderr.contains("stopping after 1 errors"), "{stderr}");
    assert_eq!(
        stderr.matches("unable to parse right side of assignment").count(),
        1,
        "{stderr}"
    );
}

#[test]
fn bad_arguments_print_usage() {
    let output = shadec(&["--frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = text(&output.stderr);
    assert!(stderr.starts_with("error: unknown option '--frobnicate'\n"), "{stderr}");
    assert!(stderr.contains("Usage: shadec"), "{stderr}");

    let output = shadec(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).starts_with("error: no input files\n"));
}

#[test]
fn help_and_version() {
    let output = shadec(&["--help"]);
    assert!(output.status.success());
    assert!(text(&output.stdout).starts_with("Usage: shadec"));

    let output = shadec(&["--version"]);
    assert!(output.status.success());
    assert_eq!(
        text(&output.stdout),
        format!("shadec {}\n", env!("CARGO_PKG_VERSION"))
    );
}
