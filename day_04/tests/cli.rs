use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn sample_outputs_right_answers() {
    let mut cmd = Command::cargo_bin("day_04").unwrap();
    cmd.arg("tests/sample.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("Part 1: 18"))
        .stdout(str::contains("Part 2: 9"));
}

#[test]
fn unknown_letter_is_rejected() {
    let mut cmd = Command::cargo_bin("day_04").unwrap();
    cmd.arg("tests/bad_letter.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Invalid letter: Q"));
}
