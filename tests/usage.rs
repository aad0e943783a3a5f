use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command { Command::cargo_bin("brainfuck").unwrap() }

#[test]
fn no_arguments_shows_help() {
    cargo_bin()
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Brainfuck Interpreter").and(predicate::str::contains("30,000 cells")));
}

#[test]
fn help_flags_show_help() {
    for flag in ["-h", "--help"] {
        cargo_bin()
            .arg(flag)
            .assert()
            .success()
            .stderr(predicate::str::contains("Usage:"));
    }
}

#[test]
fn unknown_flag_is_an_argument_error() {
    cargo_bin()
        .args(["program.bf", "--verbose"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--verbose"));
}

#[test]
fn too_many_arguments_is_an_argument_error() {
    cargo_bin()
        .args(["one.bf", "two.bf"])
        .assert()
        .code(2);
}
