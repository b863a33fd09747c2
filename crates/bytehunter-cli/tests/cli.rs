use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn fixture(bytes: &[u8]) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(bytes).unwrap();
    f.flush().unwrap();
    f
}

fn bytehunter() -> Command {
    let mut cmd = Command::cargo_bin("bytehunter").unwrap();
    cmd.env("RUST_LOG", "warn").arg("--no-progress");
    cmd
}

#[test]
fn basic_prints_json_report() {
    let f = fixture(&[5, 5, 5, 5, 9]);
    let out = bytehunter()
        .args(["basic", "--threshold", "2", "--file"])
        .arg(f.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["mode"], "Basic mode");
    assert_eq!(v["results"][0]["range"], serde_json::json!([0, 3]));
    assert_eq!(v["results"][0]["size"], 3);
}

#[test]
fn custom_with_inline_mapper() {
    let f = fixture(&[0x41, 0x41, 0x42]);
    bytehunter()
        .args(["custom", "--mapper", "{'41': 'A-byte'}", "--file"])
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"A-byte\": 2"));
}

#[test]
fn custom_with_toml_mapper_file() {
    let f = fixture(&[0xde, 0xad, 0xbe, 0xef, 0x00]);
    let dir = tempfile::tempdir().unwrap();
    let map = dir.path().join("map.toml");
    std::fs::write(&map, "[mapper]\n\"dead beef\" = \"marker\"\n\"00\" = \"zero\"\n").unwrap();
    bytehunter()
        .args(["custom", "--mapper-file"])
        .arg(&map)
        .arg("--file")
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"marker\": 1").and(predicate::str::contains("\"zero\": 1")));
}

#[test]
fn regex_writes_output_file() {
    let f = fixture(&[0x41, 1, 2, 3]);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.json");
    bytehunter()
        .args(["regex", "--pattern", r"\x41XX", "--output"])
        .arg(&out)
        .arg("--file")
        .arg(f.path())
        .assert()
        .success();
    let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["mode"], "Regex mode");
    assert_eq!(v["results"], serde_json::json!([[0x41, 1, 2]]));
}

#[test]
fn invalid_arguments_fail() {
    let f = fixture(&[1]);
    bytehunter()
        .args(["regex", "--pattern", "AB", "--file"])
        .arg(f.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must end with 'X'"));
    bytehunter()
        .args(["basic", "--threshold", "-3", "--file"])
        .arg(f.path())
        .assert()
        .failure();
    bytehunter()
        .args(["custom", "--mapper", "{}", "--file"])
        .arg(f.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one key"));
}

#[test]
fn empty_file_is_rejected() {
    let f = fixture(&[]);
    bytehunter()
        .args(["basic", "--threshold", "1", "--file"])
        .arg(f.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("This file is empty"));
}

#[test]
fn interactive_reads_prompts_from_stdin() {
    let f = fixture(&[7, 7, 7]);
    let script = format!("1\n{}\n1\n", f.path().display());
    bytehunter()
        .arg("interactive")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"repeating_byte\": 7"));
}

#[test]
fn interactive_keeps_prompts_off_stdout() {
    let f = fixture(&[7, 7, 7]);
    let script = format!("1\n{}\n1\n", f.path().display());
    let assert = bytehunter()
        .arg("interactive")
        .write_stdin(script)
        .assert()
        .success()
        .stderr(predicate::str::contains("Please choose a mode"))
        .stderr(predicate::str::contains("Calculating...."));
    let v: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(v["mode"], "Basic mode");
    assert_eq!(v["results"][0]["repeating_byte"], 7);
}
