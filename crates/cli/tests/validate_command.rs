use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[allow(deprecated)]
fn czml() -> Command {
    let mut cmd = Command::cargo_bin("czml").expect("binary");
    cmd.env_remove("CZML_EXAMPLES_BASE_URL").arg("--quiet");
    cmd
}

fn write_scene(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn validate_reports_clean_document() {
    let temp = tempdir().unwrap();
    let path = write_scene(
        temp.path(),
        "scene.czml",
        r#"[
            {"id": "document", "name": "Scene", "version": "1.0"},
            {"id": "hq", "position": {"cartographicDegrees": [-122.4, 37.8, 0]}, "point": {"pixelSize": 8}}
        ]"#,
    );

    czml()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("scene.czml: valid (2 packets"))
        .stdout(predicate::str::contains("entity types: point"));
}

#[test]
fn validate_json_output_and_exit_code() {
    let temp = tempdir().unwrap();
    let path = write_scene(
        temp.path(),
        "bad.czml",
        r#"[{"id": "document"}, {"id": "p", "position": {"cartographicDegrees": [0, 95, 0]}}]"#,
    );

    let output = czml()
        .arg("validate")
        .arg("--json")
        .arg(&path)
        .output()
        .expect("command run");

    assert!(!output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["valid"], false);
    assert_eq!(body["packetCount"], 2);
    assert_eq!(
        body["errors"][0]["path"],
        "[1].position.cartographicDegrees[1]"
    );
}

#[test]
fn strict_mode_fails_on_warnings() {
    let temp = tempdir().unwrap();
    let path = write_scene(temp.path(), "warn.czml", r#"[{"id": "document"}]"#);

    czml().arg("validate").arg(&path).assert().success();
    czml()
        .arg("validate")
        .arg("--strict")
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn validate_reads_stdin() {
    czml()
        .arg("validate")
        .arg("-")
        .write_stdin(r#"[{"id": "document", "name": "piped", "version": "1.0"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("stdin: valid"));
}

#[test]
fn load_failures_are_reported_with_source() {
    let temp = tempdir().unwrap();
    let path = write_scene(temp.path(), "object.czml", r#"{"id": "document"}"#);

    czml()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "object.czml: CZML data must be an array",
        ));

    let output = czml()
        .arg("validate")
        .arg("--json")
        .arg(temp.path().join("missing.czml"))
        .output()
        .expect("command run");
    assert!(!output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["success"], false);
    assert_eq!(body["source"], "missing.czml");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Error reading file"));
}

#[test]
fn summary_prints_entity_counts() {
    let temp = tempdir().unwrap();
    let path = write_scene(
        temp.path(),
        "fleet.czml",
        r#"[
            {"id": "document", "name": "Fleet", "version": "1.0"},
            {"id": "a", "point": {}, "path": {}},
            {"id": "b", "point": {}}
        ]"#,
    );

    let output = czml()
        .arg("summary")
        .arg("--json")
        .arg(&path)
        .output()
        .expect("command run");
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["name"], "Fleet");
    assert_eq!(body["entityCount"], 2);
    assert_eq!(body["entityTypes"]["point"], 2);
    assert_eq!(body["entityTypes"]["path"], 1);
}

#[test]
fn summary_text_lists_packets_outside_the_typed_model() {
    let temp = tempdir().unwrap();
    let path = write_scene(
        temp.path(),
        "loose.czml",
        r#"[
            {"id": "document", "name": "Loose", "version": "1.0"},
            {"id": "route", "polyline": {"width": 3}},
            {"id": "hq", "point": {}}
        ]"#,
    );

    czml()
        .arg("summary")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loose (version 1.0)"))
        .stdout(predicate::str::contains("1 packets do not fit the typed model:"))
        .stdout(predicate::str::contains("[1] Serialization error"));
}

#[test]
fn examples_lists_registry() {
    czml()
        .arg("examples")
        .assert()
        .success()
        .stdout(predicate::str::contains("satellite-orbit"))
        .stdout(predicate::str::contains("/czml-examples/multi-vehicle.czml"));
}

#[test]
fn unknown_example_fails() {
    czml()
        .arg("example")
        .arg("moon-base")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown example: moon-base"));
}
