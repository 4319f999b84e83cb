// CLI integration tests for the tree/flat flows.
use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;

const SAVE_DOC: &str =
    r#"{"obj_name":"name","list_data":[1,2,{"d":1}],"dict_data":{"a":1,"b":2},"obj_data":null}"#;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_rejig");
    Command::new(exe)
}

fn write_doc(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn flat_round_trips_a_document() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_doc(&temp, "save.json", SAVE_DOC);

    let output = cmd()
        .args(["flat", path.to_str().unwrap()])
        .output()
        .expect("flat");
    assert!(output.status.success());

    let flat: Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    let original: Value = serde_json::from_str(SAVE_DOC).expect("fixture json");
    assert_eq!(flat, original);
}

#[test]
fn flat_with_protection_still_round_trips() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_doc(&temp, "save.json", SAVE_DOC);

    let output = cmd()
        .args(["flat", path.to_str().unwrap(), "--protect", "dict_data"])
        .output()
        .expect("flat");
    assert!(output.status.success());

    let flat: Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    let original: Value = serde_json::from_str(SAVE_DOC).expect("fixture json");
    assert_eq!(flat, original);
}

#[test]
fn flat_pretty_never_colors_without_a_tty() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_doc(&temp, "save.json", SAVE_DOC);

    let output = cmd()
        .args(["flat", path.to_str().unwrap(), "--pretty", "--color", "never"])
        .output()
        .expect("flat pretty");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(!text.contains('\u{1b}'));
    assert!(text.trim_start().starts_with('{'));
}

#[test]
fn tree_prints_indented_attributes() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_doc(&temp, "save.json", SAVE_DOC);

    let output = cmd()
        .args(["tree", path.to_str().unwrap(), "--indent", "2"])
        .output()
        .expect("tree");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "\u{221f} node[4]");
    assert!(lines.contains(&"  \u{221f} dict_data -> node[2]"));
    assert!(lines.contains(&"    \u{221f} a -> 1"));
    assert!(lines.contains(&"  \u{221f} obj_name -> \"name\""));
}

#[test]
fn tree_marks_protected_keys_as_records() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_doc(&temp, "save.json", SAVE_DOC);

    let output = cmd()
        .args([
            "tree",
            path.to_str().unwrap(),
            "--indent",
            "2",
            "--protect",
            "dict_data",
        ])
        .output()
        .expect("tree");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.contains("dict_data -> record[2]"));
}

#[test]
fn tree_reads_stdin_when_no_file_is_given() {
    let mut child = cmd()
        .args(["tree", "--indent", "1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(br#"{"a": 1}"#)
        .expect("pipe doc");
    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.contains("a -> 1"));
}

#[test]
fn invalid_json_fails_with_invalid_input() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_doc(&temp, "broken.json", "{not json");

    let output = cmd()
        .args(["flat", path.to_str().unwrap()])
        .output()
        .expect("flat");
    assert_eq!(output.status.code(), Some(2));

    let err: Value = serde_json::from_slice(&output.stderr).expect("json stderr");
    assert_eq!(err["error"]["kind"], "InvalidInput");
}

#[test]
fn top_level_array_fails_with_invalid_input() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_doc(&temp, "list.json", "[1, 2, 3]");

    let output = cmd()
        .args(["tree", path.to_str().unwrap()])
        .output()
        .expect("tree");
    assert_eq!(output.status.code(), Some(2));

    let err: Value = serde_json::from_slice(&output.stderr).expect("json stderr");
    assert_eq!(err["error"]["kind"], "InvalidInput");
    assert_eq!(err["error"]["message"], "parameter must be a record");
}

#[test]
fn missing_file_fails_with_io_error() {
    let output = cmd()
        .args(["flat", "/nonexistent/save.json"])
        .output()
        .expect("flat");
    assert_eq!(output.status.code(), Some(5));

    let err: Value = serde_json::from_slice(&output.stderr).expect("json stderr");
    assert_eq!(err["error"]["kind"], "Io");
}

#[test]
fn completion_emits_a_script() {
    let output = cmd().args(["completion", "bash"]).output().expect("completion");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.contains("rejig"));
}
