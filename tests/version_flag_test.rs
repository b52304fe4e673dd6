use std::process::Command;

#[test]
fn test_version_flag() {
    // Build the binary path
    let binary_path = env!("CARGO_BIN_EXE_appstate");

    let output = Command::new(binary_path)
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(
        output.status.success(),
        "Version flag should exit with code 0"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("appstate {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_short_version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_appstate"))
        .arg("-V")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("appstate "));
}

#[test]
fn test_unknown_flag_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_appstate"))
        .arg("--bogus")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--bogus"));
}
