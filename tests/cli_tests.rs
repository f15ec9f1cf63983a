//! CLI argument behavior, exercised against the built binary.

use assert_cmd::Command;

#[test]
fn missing_arguments_print_usage_and_fail() {
    let output = Command::cargo_bin("marquee")
        .unwrap()
        .output()
        .expect("binary runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {}", stderr);
}

#[test]
fn too_few_arguments_fail() {
    let output = Command::cargo_bin("marquee")
        .unwrap()
        .args(["ticketing"])
        .output()
        .expect("binary runs");

    assert!(!output.status.success());
}

#[test]
fn non_numeric_port_fails() {
    let output = Command::cargo_bin("marquee")
        .unwrap()
        .args(["ticketing", "not-a-port", "app"])
        .output()
        .expect("binary runs");

    assert!(!output.status.success());
}

#[test]
fn help_mentions_the_positional_arguments() {
    let output = Command::cargo_bin("marquee")
        .unwrap()
        .arg("--help")
        .output()
        .expect("binary runs");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DBNAME"));
    assert!(stdout.contains("PORT"));
    assert!(stdout.contains("USER"));
}
