use std::process::Command;

fn run_relay(api_key: &str, origin: &str) -> std::process::Output {
    // Empty values are present in the environment, so a stray .env cannot fill them in.
    Command::new(env!("CARGO_BIN_EXE_chat-relay"))
        .env("HF_API_KEY", api_key)
        .env("CORS_ORIGIN", origin)
        .env("PORT", "0")
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .output()
        .unwrap()
}

#[test]
fn startup_without_api_key_exits_non_zero() {
    let output = run_relay("", "https://chat.example.com");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HF_API_KEY"), "stderr: {stderr}");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Server running"));
}

#[test]
fn startup_without_cors_origin_exits_non_zero() {
    let output = run_relay("hf_test_key", "");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CORS_ORIGIN"), "stderr: {stderr}");
}
