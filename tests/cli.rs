use assert_cmd::Command;

#[test]
fn list_prints_catalog_without_a_tty() {
    let output = Command::cargo_bin("codesprint")
        .unwrap()
        .arg("--list")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("JavaScript (javascript)"));
    assert!(stdout.contains("rust-lang/rustfmt/src/formatting.rs"));
}

#[test]
fn refuses_to_start_without_a_tty() {
    let output = Command::cargo_bin("codesprint")
        .unwrap()
        .arg("--offline")
        .write_stdin("")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("stdin must be a tty"));
}
