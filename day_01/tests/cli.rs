use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn sample_outputs_right_answers() {
    let mut cmd = Command::cargo_bin("day_01").unwrap();
    cmd.arg("tests/sample.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("Part 1: 11"))
        .stdout(str::contains("Part 2: 31"));
}

#[test]
fn missing_input_file_is_reported() {
    let mut cmd = Command::cargo_bin("day_01").unwrap();
    cmd.arg("tests/does_not_exist.txt");

    cmd.assert().failure().stderr(str::contains("Failed to read input from"));
}
