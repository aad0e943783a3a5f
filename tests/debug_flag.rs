// Verifies that --debug prints the memory breakdown after a completed run.
use predicates::prelude::*;
use std::io::Write;

fn source_file(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::Builder::new().suffix(".bf").tempfile().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn debug_flag_prints_memory_breakdown() {
    let tf = source_file("++>+++>>");
    let mut cmd = assert_cmd::Command::cargo_bin("brainfuck")
        .expect("failed to locate brainfuck binary");

    cmd.arg(tf.path())
        .arg("--debug")
        .arg("--no-color")
        .assert()
        .success()
        .stderr(predicates::str::contains("Memory Breakdown")
            .and(predicates::str::contains("      0 - [2]"))
            .and(predicates::str::contains("      1 - [3]"))
            .and(predicates::str::contains("ptr => 3"))
        );
}

#[test]
fn short_debug_flag_reports_zeroed_cell() {
    let tf = source_file("+++[-]");
    let mut cmd = assert_cmd::Command::cargo_bin("brainfuck")
        .expect("failed to locate brainfuck binary");

    cmd.args(["-d", "--no-color"])
        .arg(tf.path())
        .assert()
        .success()
        .stderr(predicates::str::contains("No output provided.")
            .and(predicates::str::contains("ptr => 0"))
            .and(predicates::str::contains("[0]").not())
        );
}

#[test]
fn no_report_without_flag() {
    let tf = source_file("+.");
    let mut cmd = assert_cmd::Command::cargo_bin("brainfuck")
        .expect("failed to locate brainfuck binary");

    cmd.arg(tf.path())
        .assert()
        .success()
        .stderr(predicates::str::contains("Memory Breakdown").not());
}
