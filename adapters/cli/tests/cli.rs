use std::process::Command;

fn retro_snake() -> Command {
    Command::new(env!("CARGO_BIN_EXE_retro-snake"))
}

#[test]
fn help_lists_tuning_flags() {
    let output = retro_snake()
        .arg("--help")
        .output()
        .expect("failed to invoke retro-snake --help");

    assert!(output.status.success(), "--help should succeed");
    let help = String::from_utf8_lossy(&output.stdout);
    for flag in ["--settings", "--cells", "--tick-ms", "--seed", "--assets"] {
        assert!(help.contains(flag), "help should mention {flag}");
    }
}

#[test]
fn missing_settings_file_fails_before_opening_a_window() {
    let output = retro_snake()
        .args(["--settings", "does-not-exist/settings.toml"])
        .output()
        .expect("failed to invoke retro-snake");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does-not-exist/settings.toml"),
        "error should name the settings file, got: {stderr}"
    );
}

#[test]
fn zero_tick_interval_is_rejected() {
    let output = retro_snake()
        .args(["--tick-ms", "0", "--seed", "1"])
        .output()
        .expect("failed to invoke retro-snake");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tick interval"), "got: {stderr}");
}
