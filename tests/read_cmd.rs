use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command { Command::cargo_bin("brainfuck").unwrap() }

fn source_file(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::Builder::new().suffix(".bf").tempfile().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn prints_cell_value_as_byte() {
    let tf = source_file("+++.");
    cargo_bin()
        .arg(tf.path())
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout("\u{3}\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn multiplication_loop_prints_forty() {
    let tf = source_file("+++++[>++++++++<-]>.");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout("(\n");
}

#[test]
fn commented_multiline_source_runs() {
    let tf = source_file(
        "// Print 'A'\n\
         ++++++++ [ > ++++++++ < - ]   /* 8 * 8 = 64 */\n\
         > + .   // 65\n",
    );
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout("A\n");
}

#[test]
fn program_without_output_prints_notice() {
    let tf = source_file("+++[-]");
    cargo_bin()
        .arg(tf.path())
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No output provided."));
}
