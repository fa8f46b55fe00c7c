use std::fs;
use std::process::Command;

const SCRIPT: &str = r#"[
    {"op": "key", "key": "r"},
    {"op": "down", "x": 10, "y": 10},
    {"op": "move", "x": 50, "y": 30},
    {"op": "up", "x": 110, "y": 60},
    {"op": "tool", "tool": "brush"},
    {"op": "down", "x": 0, "y": 100},
    {"op": "move", "x": 20, "y": 110},
    {"op": "up", "x": 40, "y": 100}
]"#;

#[test]
fn test_replay_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("script.json");
    let svg = dir.path().join("out.svg");
    let snapshot = dir.path().join("scene.json");
    fs::write(&script, SCRIPT).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_easel"))
        .arg(&script)
        .arg("--svg")
        .arg(&svg)
        .arg("--snapshot")
        .arg(&snapshot)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("objects:  2"), "{stdout}");
    assert!(stdout.contains("history:  3 entries, at 2"), "{stdout}");

    assert!(fs::read_to_string(&svg).unwrap().starts_with("<svg"));
    let scene: serde_json::Value = serde_json::from_str(&fs::read_to_string(&snapshot).unwrap()).unwrap();
    assert_eq!(scene["shapes"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("script.json");
    let config = dir.path().join("config.json");
    fs::write(
        &script,
        r#"[{"op": "tool", "tool": "line"}, {"op": "down", "x": 0, "y": 0}, {"op": "up", "x": 5, "y": 5}]"#,
    )
    .unwrap();
    fs::write(&config, r#"{"min_shape_extent": 10.0}"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_easel"))
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    // The short drag falls under the configured minimum
    assert!(String::from_utf8_lossy(&output.stdout).contains("objects:  0"));
}

#[test]
fn test_bad_script_fails() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("script.json");
    fs::write(&script, r#"[{"op": "explode"}]"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_easel")).arg(&script).output().unwrap();
    assert!(!output.status.success());
}
