use assert_cmd::Command;
use predicates::prelude::*;

fn articlegen() -> Command {
    Command::cargo_bin("articlegen").unwrap()
}

#[test]
fn no_subcommand_is_a_usage_error() {
    articlegen()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_without_videos_is_a_usage_error() {
    articlegen()
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("VIDEO"));
}

#[test]
fn generate_rejects_more_than_ten_videos() {
    let videos: Vec<String> = (0..11).map(|i| format!("aaaaaaaaaa{i}")).collect();

    articlegen()
        .arg("generate")
        .args(&videos)
        .assert()
        .failure();
}

#[test]
fn generate_rejects_unknown_output_size() {
    articlegen()
        .args(["generate", "dQw4w9WgXcQ", "--output-size", "enormous"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("output-size"));
}

#[test]
fn help_lists_subcommands() {
    articlegen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("config"));
}
