//! End-to-end checks of the registry commands.

mod common;

use common::TestFixture;

#[test]
fn uuid_count_controls_line_count() {
    let fixture = TestFixture::new().expect("fixture");
    let result = fixture
        .run(&["uuid", "--count", "2", "--output", "text"])
        .expect("run uuid");
    assert!(result.success, "stderr: {}", result.stderr);
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(lines.len(), 2, "stdout: {}", result.stdout);
    for line in lines {
        assert_eq!(line.len(), 36, "not a uuid: {line}");
    }
}

#[test]
fn uuid_rejects_unknown_output_format() {
    let fixture = TestFixture::new().expect("fixture");
    let result = fixture
        .run(&["uuid", "--output", "xml"])
        .expect("run uuid");
    assert!(!result.success);
    assert!(result.stderr.contains("xml"), "stderr: {}", result.stderr);
}

#[test]
fn env_get_falls_back_to_default() {
    let fixture = TestFixture::new().expect("fixture");
    let result = fixture
        .run(&["env", "get", "HEIMDALL_TEST_SURELY_UNSET", "--default", "fallback"])
        .expect("run env get");
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.stdout.trim(), "fallback");
}

#[test]
fn echo_writes_styled_text() {
    let fixture = TestFixture::new().expect("fixture");
    let result = fixture
        .run(&["echo", "--bold", "hello", "world"])
        .expect("run echo");
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("hello world"));
    assert!(result.stdout.contains("\u{1b}["));
}

#[test]
fn invalid_config_is_reported_with_path() {
    let fixture = TestFixture::with_config("{ not json").expect("fixture");
    let result = fixture.run(&["uuid"]).expect("run uuid");
    assert!(!result.success);
    assert!(result.stderr.contains("config.json"), "stderr: {}", result.stderr);
}
