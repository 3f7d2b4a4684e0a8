#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:ops-alerts";

fn alarmctl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("alarmctl").unwrap();
    cmd.current_dir(dir.path());
    for var in [
        "ALARMCTL_CONFIG",
        "ALARMCTL_LIST_ALARMS",
        "ALARMCTL_STATES",
        "ALARMCTL_ACTION",
        "ALARMCTL_TOPIC_ARN",
        "ALARMCTL_DRY_RUN",
        "ALARMCTL_BATCH_SIZE",
        "ALARMCTL_REGION",
        "ALARMCTL_ENDPOINT_URL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_list(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("alarms.json");
    std::fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// alarmctl validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_wrapped_list() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"{"alarms": ["cpu-high", "disk-full", "cpu-high"]}"#);

    alarmctl(&dir)
        .args(["validate", "--list-alarms", &list, "--states", "ok,IN_ALARM"])
        .args(["--topic-arn", TOPIC])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 2 alarm(s)"))
        .stdout(predicate::str::contains("States: OK, IN_ALARM"));
}

#[test]
fn validate_json_output() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["b", "a"]"#);

    let output = alarmctl(&dir)
        .args(["--json", "validate", "--list-alarms", &list, "--insufficient-data"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["alarms"], serde_json::json!(["b", "a"]));
    assert_eq!(value["states"], serde_json::json!(["INSUFFICIENT_DATA"]));
    assert_eq!(value["batch_size"], 100);
}

#[test]
fn validate_rejects_alarm_state_spelling() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);

    alarmctl(&dir)
        .args(["validate", "--list-alarms", &list, "--states", "ALARM"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid alarm state 'ALARM'"));
}

#[test]
fn validate_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);
    std::fs::write(dir.path().join("alarmctl.yaml"), "batch_size: 500\n").unwrap();

    alarmctl(&dir)
        .args(["validate", "--list-alarms", &list])
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch_size=500"));
}

#[test]
fn validate_reads_local_config() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);
    std::fs::write(dir.path().join("alarmctl.yaml"), "batch_size: 25\n").unwrap();

    alarmctl(&dir)
        .args(["validate", "--list-alarms", &list])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch size: 25"));
}

// ---------------------------------------------------------------------------
// alarmctl update (offline failures: nothing reaches AWS)
// ---------------------------------------------------------------------------

fn update(dir: &TempDir, list: &str) -> Command {
    let mut cmd = alarmctl(dir);
    cmd.args(["update", "--list-alarms", list, "--action", "add"]);
    cmd
}

#[test]
fn update_invalid_state_fails() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);

    update(&dir, &list)
        .args(["--states", "OK,ALARM", "--topic-arn", TOPIC, "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid alarm state 'ALARM'"));
}

#[test]
fn update_without_states_fails() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);

    update(&dir, &list)
        .args(["--topic-arn", TOPIC, "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no alarm states selected"));
}

#[test]
fn update_malformed_topic_fails() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);

    update(&dir, &list)
        .args(["--ok", "--topic-arn", "my-topic", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed topic ARN"));
}

#[test]
fn update_empty_list_fails() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"{"alarms": []}"#);

    update(&dir, &list)
        .args(["--ok", "--topic-arn", TOPIC, "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alarm list is empty"));
}

#[test]
fn update_malformed_json_fails() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"{"alarms": ["a""#);

    update(&dir, &list)
        .args(["--ok", "--topic-arn", TOPIC, "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load alarm list"));
}

#[test]
fn update_missing_list_file_fails() {
    let dir = TempDir::new().unwrap();

    alarmctl(&dir)
        .args(["update", "--list-alarms", "missing.json", "--action", "add"])
        .args(["--ok", "--topic-arn", TOPIC])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn update_batch_size_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);

    update(&dir, &list)
        .args(["--ok", "--topic-arn", TOPIC, "--batch-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid batch size 0"));
}

#[test]
fn update_unknown_action_fails() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);

    alarmctl(&dir)
        .args(["update", "--list-alarms", &list, "--action", "toggle"])
        .args(["--ok", "--topic-arn", TOPIC])
        .assert()
        .failure()
        .stderr(predicate::str::contains("toggle"));
}

#[test]
fn update_states_conflict_with_flags() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);

    update(&dir, &list)
        .args(["--states", "OK", "--in-alarm", "--topic-arn", TOPIC])
        .assert()
        .failure();
}

#[test]
fn update_accepts_numeric_dry_run_env() {
    let dir = TempDir::new().unwrap();
    let list = write_list(&dir, r#"["a"]"#);

    // The env value must parse; the run then stops on the bad state.
    update(&dir, &list)
        .env("ALARMCTL_DRY_RUN", "1")
        .args(["--states", "ALARM", "--topic-arn", TOPIC])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid alarm state 'ALARM'"));
}
