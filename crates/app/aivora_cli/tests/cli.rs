use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_options() {
    Command::cargo_bin("aivora_cli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--server"))
        .stdout(predicate::str::contains("--token"));
}

#[test]
fn message_without_token_asks_to_log_in() {
    Command::cargo_bin("aivora_cli")
        .unwrap()
        .env_remove("AIVORA_TOKEN")
        .args(["--server", "http://127.0.0.1:9", "--message", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please log in to chat with the assistant.",
        ));
}

#[test]
fn unreachable_server_reports_send_failure() {
    Command::cargo_bin("aivora_cli")
        .unwrap()
        .args([
            "--server",
            "http://127.0.0.1:9",
            "--token",
            "some-token",
            "--message",
            "hello",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Sorry, I couldn't reach the assistant. Please try again.",
        ));
}

#[test]
fn quit_ends_the_session() {
    Command::cargo_bin("aivora_cli")
        .unwrap()
        .env_remove("AIVORA_TOKEN")
        .write_stdin("/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aivora Assistant"))
        .stdout(predicate::str::contains("Hi! I'm your Aivora assistant."));
}
